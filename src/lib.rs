// Library exports for grokmusic crate
// main.rs only launches what build_rocket assembles, so tests can drive the same app

pub mod config;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod player;
pub mod services;

use std::sync::Arc;

use rocket::fairing::AdHoc;
use rocket::http::Header;
use rocket::{catchers, routes, Build, Rocket};
use rocket_dyn_templates::Template;

use crate::player::{PlayerController, PlayerSession};
use crate::services::catalog::Catalog;
use crate::services::consent::ConsentStore;
use crate::services::media::UploadStore;
use crate::services::playback::CommandQueue;
use crate::services::track_source::{CatalogSource, HttpTrackSource, TrackSource};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{AlbumFilter, PlayerState, Track};

pub fn build_rocket(config: Config) -> Rocket<Build> {
    let catalog = Arc::new(Catalog::load_or_mock(&config.catalog_file));
    let commands = CommandQueue::new(config::COMMAND_BACKLOG);
    let uploads = UploadStore::new(&config.upload_dir, config::MEDIA_ROUTE);

    let source: Box<dyn TrackSource> = match &config.api_url {
        Some(url) => {
            log::info!("Player reads tracks from {}", url);
            Box::new(HttpTrackSource::new(url))
        }
        None => Box::new(CatalogSource::new(catalog.clone())),
    };

    let controller = PlayerController::new(Box::new(commands.clone()), Box::new(uploads));
    let session = PlayerSession::new(controller, source);
    let consent = ConsentStore::load(&config.consent_file);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", config.host.clone()));

    rocket::custom(figment)
        .manage(catalog)
        .manage(session)
        .manage(commands)
        .manage(consent)
        .manage(config)
        .mount("/", routes![
            handlers::index,

            // Mock track API
            handlers::list_tracks,
            handlers::get_track,

            // Player session
            handlers::player_state,
            handlers::reload,
            handlers::select,
            handlers::toggle,
            handlers::seek,
            handlers::next,
            handlers::previous,
            handlers::filter,
            handlers::delete_track,
            handlers::upload,
            handlers::time_update,
            handlers::ended,
            handlers::playback_error,
            handlers::commands,

            // Media, localization and consent
            handlers::media,
            handlers::strings,
            handlers::consent_status,
            handlers::accept_consent,
            handlers::player_page,
            handlers::cors_preflight,
        ])
        .register("/", catchers![
            handlers::not_found,
            handlers::server_error,
        ])
        .attach(Template::fairing())
        .attach(AdHoc::on_response("CORS", |_req, res| Box::pin(async move {
            res.set_header(Header::new("Access-Control-Allow-Origin", "*"));
            res.set_header(Header::new("Access-Control-Allow-Methods", "GET, POST, DELETE, OPTIONS"));
            res.set_header(Header::new("Access-Control-Allow-Headers", "Content-Type"));
        })))
        .attach(AdHoc::on_liftoff("Initial track load", |rocket| Box::pin(async move {
            if let Some(session) = rocket.state::<PlayerSession>() {
                session.load_tracks().await;
            }
        })))
        .attach(AdHoc::on_shutdown("Release uploads", |rocket| Box::pin(async move {
            if let Some(session) = rocket.state::<PlayerSession>() {
                session.with(|player| player.release_all());
            }
        })))
}
