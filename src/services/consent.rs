// Cookie consent flag, read once at startup and written on acceptance

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

pub const CONSENT_KEY: &str = "grokMusicCookieConsent";

pub struct ConsentStore {
    path: PathBuf,
    accepted: AtomicBool,
}

impl ConsentStore {
    /// A missing or unreadable file means consent was never given.
    pub fn load(path: &Path) -> Self {
        let accepted = match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, bool>>(&content) {
                Ok(flags) => flags.get(CONSENT_KEY).copied().unwrap_or(false),
                Err(e) => {
                    log::warn!("Ignoring unreadable consent file {}: {}", path.display(), e);
                    false
                }
            },
            Err(_) => false,
        };

        Self {
            path: path.to_path_buf(),
            accepted: AtomicBool::new(accepted),
        }
    }

    pub fn accepted(&self) -> bool {
        self.accepted.load(Ordering::Relaxed)
    }

    pub fn accept(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut flags = BTreeMap::new();
        flags.insert(CONSENT_KEY.to_string(), true);
        fs::write(&self.path, serde_json::to_string_pretty(&flags)?)?;

        self.accepted.store(true, Ordering::Relaxed);
        log::info!("Cookie consent accepted");
        Ok(())
    }
}
