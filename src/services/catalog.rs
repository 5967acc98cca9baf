// Static track list served by the mock track API

use std::fs;
use std::path::Path;

use crate::models::Track;

pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// The built-in demo list.
    pub fn mock() -> Self {
        Self::new(vec![Track::remote(
            "1",
            "Example Track",
            "Grok Music",
            "Demo Album",
            180.0,
            "https://example.com/track.mp3",
        )])
    }

    /// Reads a JSON array of tracks from `catalog_file`, falling back to the
    /// mock list when the file is missing or unreadable.
    pub fn load_or_mock(catalog_file: &Path) -> Self {
        if catalog_file.exists() {
            match fs::read_to_string(catalog_file) {
                Ok(content) => match serde_json::from_str::<Vec<Track>>(&content) {
                    Ok(tracks) => {
                        log::info!("Loaded {} tracks from {}", tracks.len(), catalog_file.display());
                        return Self::new(tracks);
                    }
                    Err(e) => {
                        log::error!("Error parsing catalog file: {}", e);
                    }
                },
                Err(e) => {
                    log::error!("Error reading catalog file: {}", e);
                }
            }
        }

        Self::mock()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn find(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }
}
