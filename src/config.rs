use std::env;
use std::path::PathBuf;
use lazy_static::lazy_static;

lazy_static! {
    // Base directory
    pub static ref BASE_DIR: PathBuf = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Uploaded media lives here until the track is deleted
    pub static ref UPLOAD_FOLDER: PathBuf = BASE_DIR.join("uploads");

    // Optional catalog override for the mock track API
    pub static ref CATALOG_FILE: PathBuf = BASE_DIR.join("tracks.json");

    // Consent flag storage
    pub static ref CONSENT_FILE: PathBuf = BASE_DIR.join("consent.json");
}

// Server configuration
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_UPLOAD_LIMIT_MB: u64 = 50;

// Pending playback commands kept for the player page before new ones are rejected
pub const COMMAND_BACKLOG: usize = 64;

// Public prefix for uploaded media
pub const MEDIA_ROUTE: &str = "/media";

// Sentinels for tracks created from uploads
pub const UPLOADED_ARTIST: &str = "Unknown Artist";
pub const UPLOADED_ALBUM: &str = "Uploaded";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Remote track API. `None` serves the player from the in-process catalog.
    pub api_url: Option<String>,
    pub upload_limit_mb: u64,
    pub upload_dir: PathBuf,
    pub catalog_file: PathBuf,
    pub consent_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_url: None,
            upload_limit_mb: DEFAULT_UPLOAD_LIMIT_MB,
            upload_dir: UPLOAD_FOLDER.clone(),
            catalog_file: CATALOG_FILE.clone(),
            consent_file: CONSENT_FILE.clone(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        let upload_limit_mb = env::var("UPLOAD_LIMIT_MB")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(DEFAULT_UPLOAD_LIMIT_MB);

        let api_url = env::var("GROK_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port,
            api_url,
            upload_limit_mb,
            ..defaults
        }
    }
}
