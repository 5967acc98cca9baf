// src/main.rs - Grok Music service entry point

use rocket::launch;

use grokmusic::config::{self, Config};

#[launch]
fn rocket() -> rocket::Rocket<rocket::Build> {
    // Initialize logging
    env_logger::init();

    let config = Config::from_env();

    println!("============================================================");
    println!("Grok Music - track API and player session");
    println!("============================================================");

    if !config.upload_dir.exists() {
        std::fs::create_dir_all(&config.upload_dir).unwrap_or_else(|e| {
            eprintln!("Failed to create upload directory: {}", e);
        });
    }

    match &config.api_url {
        Some(url) => println!("🎵 Player tracks from remote API: {}", url),
        None => println!("🎵 Player tracks from local catalog ({})", config.catalog_file.display()),
    }
    println!("   Uploads stored in: {}", config.upload_dir.display());
    println!("🌐 Server starting at: http://localhost:{}", config.port);
    println!("🎚️  Player page: http://localhost:{}/player", config.port);
    println!("   Media served under: {}", config::MEDIA_ROUTE);
    println!("============================================================");

    grokmusic::build_rocket(config)
}
