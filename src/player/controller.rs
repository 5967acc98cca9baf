//! The effectful shell around [`reduce`].

use std::collections::HashMap;
use std::mem;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::Serialize;

use crate::error::{MediaError, Result};
use crate::models::{AlbumFilter, PlayerState, Track};
use crate::player::reducer::{reduce, Direction, Effect, Event, Model};
use crate::player::views;
use crate::services::media::{ImportedMedia, LocalFile, LocalMedia};
use crate::services::playback::Playback;

/// Serializable picture of the player for the HTTP surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: PlayerState,
    pub current_track: Option<Track>,
    /// Tracks accepted by the album filter.
    pub tracks: Vec<Track>,
    pub albums: Vec<AlbumFilter>,
    pub total_tracks: usize,
}

pub struct PlayerController {
    model: Model,
    playback: Box<dyn Playback>,
    media: Arc<dyn LocalMedia>,
    // Media owned by uploaded tracks, keyed by track id
    owned: HashMap<String, ImportedMedia>,
}

impl PlayerController {
    pub fn new(playback: Box<dyn Playback>, media: Box<dyn LocalMedia>) -> Self {
        Self {
            model: Model::default(),
            playback,
            media: Arc::from(media),
            owned: HashMap::new(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.model.state
    }

    pub fn tracks(&self) -> &[Track] {
        &self.model.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.model.current_track()
    }

    pub fn albums(&self) -> Vec<AlbumFilter> {
        views::albums(&self.model.tracks)
    }

    pub fn filtered_tracks(&self) -> Vec<&Track> {
        views::filtered(&self.model.tracks, &self.model.state.filter)
    }

    /// Handle for importing uploads without borrowing the controller.
    pub fn media(&self) -> Arc<dyn LocalMedia> {
        Arc::clone(&self.media)
    }

    pub fn owns_media(&self, id: &str) -> bool {
        self.owned.contains_key(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.model.state.clone(),
            current_track: self.current_track().cloned(),
            tracks: self.filtered_tracks().into_iter().cloned().collect(),
            albums: self.albums(),
            total_tracks: self.model.tracks.len(),
        }
    }

    /// Feeds one event through the transition function and carries out its effects.
    pub fn dispatch(&mut self, event: Event) -> &PlayerState {
        debug!("Player event: {:?}", event);

        let model = mem::take(&mut self.model);
        let before = model.state.clone();
        let (model, effects) = reduce(model, event);
        self.model = model;

        if effects.is_empty() && self.model.state == before {
            debug!("Player event had no effect");
        }

        for effect in effects {
            self.execute(effect);
        }

        &self.model.state
    }

    fn execute(&mut self, effect: Effect) {
        let outcome = match &effect {
            Effect::Load(url) => self.playback.load(url),
            Effect::Play => self.playback.play(),
            Effect::Pause => self.playback.pause(),
            Effect::Stop => self.playback.stop(),
            Effect::Seek(seconds) => self.playback.seek(*seconds),
            Effect::Release(id) => {
                self.release(id);
                Ok(())
            }
        };

        if let Err(e) = outcome {
            warn!("Playback command {:?} failed: {}", effect, e);
        }
    }

    fn release(&mut self, id: &str) {
        // Removal from the map is what guarantees a single release
        if let Some(media) = self.owned.remove(id) {
            if let Err(e) = self.media.release(&media) {
                error!("Failed to release media for track {}: {}", id, e);
            }
        }
    }

    /// Applies the outcome of a track fetch. Failures leave the collection untouched.
    pub fn apply_loaded(&mut self, result: Result<Vec<Track>>) -> bool {
        match result {
            Ok(tracks) => {
                info!("Loaded {} tracks", tracks.len());
                self.dispatch(Event::TracksLoaded(tracks));
                true
            }
            Err(e) => {
                error!("Failed to fetch tracks: {}", e);
                false
            }
        }
    }

    pub fn select_track(&mut self, id: &str) -> &PlayerState {
        self.dispatch(Event::Select(id.to_string()))
    }

    pub fn toggle_playback(&mut self) -> &PlayerState {
        self.dispatch(Event::TogglePlayback)
    }

    pub fn seek(&mut self, fraction: f64) -> &PlayerState {
        self.dispatch(Event::Seek(fraction))
    }

    pub fn advance(&mut self, direction: Direction) -> &PlayerState {
        self.dispatch(Event::Advance(direction))
    }

    /// Imports an audio file, appends the new track and selects it.
    /// Non-audio files and failed imports leave the player untouched.
    pub fn upload_local_file(&mut self, file: &LocalFile) -> Option<&Track> {
        if !file.is_audio() {
            debug!("Ignoring non-audio upload {} ({:?})", file.name, file.content_type);
            return None;
        }

        let imported = self.media.import(file);
        self.adopt_upload(file, imported)
    }

    /// Turns the result of an import done elsewhere into a selected track. The
    /// controller owns the media from here on.
    pub fn adopt_upload(
        &mut self,
        file: &LocalFile,
        imported: std::result::Result<ImportedMedia, MediaError>,
    ) -> Option<&Track> {
        let media = match imported {
            Ok(media) => media,
            Err(e) => {
                warn!("Could not import {}: {}", file.name, e);
                return None;
            }
        };

        let title = media.title.clone().unwrap_or_else(|| file.stem());
        let track = Track::uploaded(title, media.duration, media.url.clone());
        let id = track.id.clone();
        let before = self.model.tracks.len();

        self.dispatch(Event::Uploaded(track));

        if self.model.tracks.len() == before {
            warn!("Upload {} produced a duplicate track id, discarding it", file.name);
            if let Err(e) = self.media.release(&media) {
                error!("Failed to release discarded upload: {}", e);
            }
            return None;
        }

        info!("Uploaded \"{}\" as track {}", file.name, id);
        self.owned.insert(id.clone(), media);
        self.model.track(&id)
    }

    pub fn delete_track(&mut self, id: &str) -> &PlayerState {
        self.dispatch(Event::Delete(id.to_string()))
    }

    pub fn set_album_filter(&mut self, filter: AlbumFilter) -> &PlayerState {
        self.dispatch(Event::SetFilter(filter))
    }

    pub fn on_time_update(&mut self, seconds: f64) -> &PlayerState {
        self.dispatch(Event::TimeUpdate(seconds))
    }

    pub fn on_playback_ended(&mut self) -> &PlayerState {
        self.dispatch(Event::Ended)
    }

    /// Releases every media resource still owned. Safe to call more than once.
    pub fn release_all(&mut self) {
        let ids: Vec<String> = self.owned.keys().cloned().collect();
        if !ids.is_empty() {
            info!("Releasing {} uploaded media files", ids.len());
        }
        for id in ids {
            self.release(&id);
        }
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.release_all();
    }
}
