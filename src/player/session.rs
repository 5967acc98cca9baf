// Shared player session managed by Rocket. Requests apply their events one at
// a time through the controller lock.

use log::{debug, error};
use parking_lot::Mutex;

use crate::models::Track;
use crate::player::controller::{PlayerController, Snapshot};
use crate::services::media::LocalFile;
use crate::services::track_source::TrackSource;

pub struct PlayerSession {
    controller: Mutex<PlayerController>,
    source: Box<dyn TrackSource>,
}

impl PlayerSession {
    pub fn new(controller: PlayerController, source: Box<dyn TrackSource>) -> Self {
        Self {
            controller: Mutex::new(controller),
            source,
        }
    }

    /// Fetches the track list and applies it to whatever the state is once
    /// the fetch completes. The lock is not held while fetching.
    pub async fn load_tracks(&self) -> bool {
        let result = self.source.fetch_tracks().await;
        self.controller.lock().apply_loaded(result)
    }

    /// Imports the file on the blocking pool, then adopts it under the lock.
    /// Disk writes and tag parsing never stall other requests.
    pub async fn upload(&self, file: LocalFile) -> Option<Track> {
        if !file.is_audio() {
            debug!("Ignoring non-audio upload {} ({:?})", file.name, file.content_type);
            return None;
        }

        let media = self.with(|player| player.media());
        let task = tokio::task::spawn_blocking(move || {
            let imported = media.import(&file);
            (file, imported)
        });

        let (file, imported) = match task.await {
            Ok(done) => done,
            Err(e) => {
                error!("Upload import task failed: {}", e);
                return None;
            }
        };

        self.with(|player| player.adopt_upload(&file, imported).cloned())
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut PlayerController) -> R) -> R {
        let mut controller = self.controller.lock();
        f(&mut controller)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.controller.lock().snapshot()
    }
}
