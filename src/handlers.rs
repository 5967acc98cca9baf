// Route handlers: mock track API, player session, media, i18n and consent

use rocket::data::{Data, ToByteUnit};
use rocket::fs::NamedFile;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::State;
use rocket::{catch, delete, get, options, post};
use rocket_dyn_templates::{context, Template};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::i18n::{Language, Strings};
use crate::models::{AlbumFilter, Track};
use crate::player::{Direction, PlayerController, PlayerSession, Snapshot};
use crate::services::catalog::Catalog;
use crate::services::consent::ConsentStore;
use crate::services::media::LocalFile;
use crate::services::playback::{CommandQueue, PlaybackCommand};

#[get("/")]
pub fn index() -> Json<Value> {
    Json(serde_json::json!({
        "message": "Grok Music API is running!"
    }))
}

// Mock track API

#[get("/api/tracks")]
pub fn list_tracks(catalog: &State<Arc<Catalog>>) -> Json<Vec<Track>> {
    Json(catalog.tracks().to_vec())
}

#[get("/api/tracks/<id>")]
pub fn get_track(id: &str, catalog: &State<Arc<Catalog>>) -> Result<Json<Track>> {
    catalog.find(id).cloned().map(Json).ok_or(AppError::NotFound)
}

// Player session

fn apply(session: &PlayerSession, action: impl FnOnce(&mut PlayerController)) -> Json<Snapshot> {
    Json(session.with(|player| {
        action(player);
        player.snapshot()
    }))
}

#[get("/api/player")]
pub fn player_state(session: &State<PlayerSession>) -> Json<Snapshot> {
    Json(session.snapshot())
}

#[post("/api/player/reload")]
pub async fn reload(session: &State<PlayerSession>) -> Json<Snapshot> {
    session.load_tracks().await;
    Json(session.snapshot())
}

#[post("/api/player/select/<id>")]
pub fn select(id: &str, session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.select_track(id);
    })
}

#[post("/api/player/toggle")]
pub fn toggle(session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.toggle_playback();
    })
}

#[post("/api/player/seek?<fraction>")]
pub fn seek(fraction: f64, session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.seek(fraction);
    })
}

#[post("/api/player/next")]
pub fn next(session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.advance(Direction::Next);
    })
}

#[post("/api/player/previous")]
pub fn previous(session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.advance(Direction::Previous);
    })
}

#[post("/api/player/filter?<album>")]
pub fn filter(album: Option<&str>, session: &State<PlayerSession>) -> Json<Snapshot> {
    let filter = AlbumFilter::parse(album);
    apply(session, |player| {
        player.set_album_filter(filter);
    })
}

#[delete("/api/player/tracks/<id>")]
pub fn delete_track(id: &str, session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.delete_track(id);
    })
}

// Raw body upload; the file type comes from the Content-Type header
#[post("/api/player/upload?<name>", data = "<data>")]
pub async fn upload(
    name: &str,
    content_type: Option<&ContentType>,
    data: Data<'_>,
    session: &State<PlayerSession>,
    config: &State<Config>,
) -> Result<Json<Snapshot>> {
    let bytes = data.open(config.upload_limit_mb.mebibytes()).into_bytes().await?;
    if !bytes.is_complete() {
        return Err(AppError::TooLarge);
    }

    let file = LocalFile::new(name, content_type.map(|ct| ct.to_string()), bytes.into_inner());
    session.upload(file).await;
    Ok(Json(session.snapshot()))
}

#[post("/api/player/timeupdate?<seconds>")]
pub fn time_update(seconds: f64, session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.on_time_update(seconds);
    })
}

#[post("/api/player/ended")]
pub fn ended(session: &State<PlayerSession>) -> Json<Snapshot> {
    apply(session, |player| {
        player.on_playback_ended();
    })
}

#[derive(Debug, Deserialize)]
pub struct PlaybackReport {
    pub message: String,
}

// The page's audio element refused a command (blocked autoplay, decode error)
#[post("/api/player/playback-error", format = "json", data = "<report>")]
pub fn playback_error(report: Json<PlaybackReport>) -> Status {
    log::warn!("Player page reported a playback failure: {}", report.message);
    Status::NoContent
}

#[get("/api/player/commands")]
pub fn commands(queue: &State<CommandQueue>) -> Json<Vec<PlaybackCommand>> {
    Json(queue.drain())
}

#[get("/media/<file..>")]
pub async fn media(file: PathBuf, config: &State<Config>) -> Option<NamedFile> {
    NamedFile::open(config.upload_dir.join(file)).await.ok()
}

// Localization and consent

#[get("/api/i18n/<lang>")]
pub fn strings(lang: &str) -> Json<&'static Strings> {
    Json(Language::from_code(lang).strings())
}

#[get("/api/consent")]
pub fn consent_status(consent: &State<ConsentStore>) -> Json<Value> {
    Json(serde_json::json!({ "accepted": consent.accepted() }))
}

#[post("/api/consent")]
pub fn accept_consent(consent: &State<ConsentStore>) -> Result<Json<Value>> {
    consent.accept()?;
    Ok(Json(serde_json::json!({ "accepted": true })))
}

#[get("/player?<lang>")]
pub fn player_page(
    lang: Option<&str>,
    session: &State<PlayerSession>,
    consent: &State<ConsentStore>,
) -> Template {
    let language = lang.map(Language::from_code).unwrap_or_default();

    Template::render("player", context! {
        lang: language.code(),
        other_lang: language.other().code(),
        t: language.strings(),
        snapshot: session.snapshot(),
        consent: consent.accepted(),
    })
}

#[options("/<_..>")]
pub fn cors_preflight() -> Status {
    Status::NoContent
}

// Error catchers
#[catch(404)]
pub fn not_found() -> Json<Value> {
    Json(serde_json::json!({ "error": "Not found" }))
}

#[catch(500)]
pub fn server_error() -> Json<Value> {
    Json(serde_json::json!({ "error": "Internal server error" }))
}
