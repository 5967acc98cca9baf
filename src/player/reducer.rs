//! Pure transition function of the player.
//!
//! Every user action and every playback-engine callback is an [`Event`].
//! [`reduce`] consumes the current [`Model`] and returns the next one together
//! with the [`Effect`]s the shell has to carry out. Nothing here touches the
//! playback engine or the filesystem.

use std::collections::HashSet;

use crate::models::{AlbumFilter, PlayerState, Track};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Result of a successful track fetch.
    TracksLoaded(Vec<Track>),
    Select(String),
    TogglePlayback,
    /// Fraction of the current track's duration.
    Seek(f64),
    Advance(Direction),
    /// A track built from an imported local file.
    Uploaded(Track),
    Delete(String),
    SetFilter(AlbumFilter),
    /// Playback position reported by the engine, in seconds.
    TimeUpdate(f64),
    Ended,
}

/// Commands for the outside world, executed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Load(String),
    Play,
    Pause,
    Stop,
    Seek(f64),
    /// Release the media owned by this track id, if any.
    Release(String),
}

/// Everything the player knows: the ordered collection plus the view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub tracks: Vec<Track>,
    pub state: PlayerState,
}

impl Model {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            state: PlayerState::default(),
        }
    }

    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current.as_deref().and_then(|id| self.track(id))
    }
}

pub fn reduce(model: Model, event: Event) -> (Model, Vec<Effect>) {
    match event {
        Event::TracksLoaded(loaded) => tracks_loaded(model, loaded),
        Event::Select(id) => select(model, &id),
        Event::TogglePlayback => toggle(model),
        Event::Seek(fraction) => seek(model, fraction),
        Event::Advance(direction) => advance(model, direction),
        Event::Uploaded(track) => uploaded(model, track),
        Event::Delete(id) => delete(model, &id),
        Event::SetFilter(filter) => {
            let state = PlayerState { filter, ..model.state };
            (Model { state, ..model }, Vec::new())
        }
        Event::TimeUpdate(seconds) => time_update(model, seconds),
        Event::Ended => ended(model),
    }
}

fn unchanged(model: Model) -> (Model, Vec<Effect>) {
    (model, Vec::new())
}

// Loaded tracks replace the remote part of the collection. Uploads stay
// after them because the session still owns their media.
fn tracks_loaded(model: Model, loaded: Vec<Track>) -> (Model, Vec<Effect>) {
    let Model { tracks, state } = model;

    let mut seen = HashSet::new();
    let mut next: Vec<Track> = loaded
        .into_iter()
        .filter(|t| !t.is_uploaded() && seen.insert(t.id.clone()))
        .collect();
    next.extend(tracks.into_iter().filter(|t| t.is_uploaded() && !seen.contains(&t.id)));

    let model = Model { tracks: next, state };
    let current_gone = model.state.current.is_some() && model.current_track().is_none();
    if current_gone {
        let state = model.state.cleared();
        (Model { state, ..model }, vec![Effect::Stop])
    } else {
        unchanged(model)
    }
}

fn select(model: Model, id: &str) -> (Model, Vec<Effect>) {
    let url = match model.track(id) {
        Some(track) => track.url.clone(),
        None => return unchanged(model),
    };

    let state = model.state.focused(id);
    (Model { state, ..model }, vec![Effect::Load(url), Effect::Play])
}

fn toggle(model: Model) -> (Model, Vec<Effect>) {
    if model.current_track().is_none() {
        return unchanged(model);
    }

    let playing = !model.state.playing;
    let effect = if playing { Effect::Play } else { Effect::Pause };
    let state = PlayerState { playing, ..model.state };
    (Model { state, ..model }, vec![effect])
}

// Out-of-range fractions are clamped, non-finite ones ignored.
fn seek(model: Model, fraction: f64) -> (Model, Vec<Effect>) {
    if !fraction.is_finite() {
        return unchanged(model);
    }
    let duration = match model.current_track() {
        Some(track) => track.duration_secs(),
        None => return unchanged(model),
    };

    let elapsed = fraction.clamp(0.0, 1.0) * duration;
    let state = PlayerState {
        elapsed: Some(elapsed),
        ..model.state
    };
    (Model { state, ..model }, vec![Effect::Seek(elapsed)])
}

/// Index of the neighbour of the current track in the unfiltered collection.
fn neighbour(model: &Model, direction: Direction) -> Option<usize> {
    let index = model.position(model.state.current.as_deref()?)?;
    match direction {
        Direction::Next => Some(index + 1).filter(|&i| i < model.tracks.len()),
        Direction::Previous => index.checked_sub(1),
    }
}

fn advance(model: Model, direction: Direction) -> (Model, Vec<Effect>) {
    match neighbour(&model, direction) {
        Some(index) => {
            let id = model.tracks[index].id.clone();
            select(model, &id)
        }
        None => unchanged(model),
    }
}

fn uploaded(model: Model, track: Track) -> (Model, Vec<Effect>) {
    if model.track(&track.id).is_some() {
        return unchanged(model);
    }

    let id = track.id.clone();
    let mut tracks = model.tracks;
    tracks.push(track);
    select(Model { tracks, ..model }, &id)
}

fn delete(model: Model, id: &str) -> (Model, Vec<Effect>) {
    let index = match model.position(id) {
        Some(index) => index,
        None => return unchanged(model),
    };

    let Model { mut tracks, state } = model;
    let removed = tracks.remove(index);

    let mut effects = Vec::new();
    let state = if state.is_current(id) {
        effects.push(Effect::Stop);
        state.cleared()
    } else {
        state
    };
    // Stop comes first so the engine lets go of the media before it is released.
    if removed.is_uploaded() {
        effects.push(Effect::Release(removed.id));
    }

    (Model { tracks, state }, effects)
}

fn time_update(model: Model, seconds: f64) -> (Model, Vec<Effect>) {
    if !seconds.is_finite() {
        return unchanged(model);
    }
    let duration = match model.current_track() {
        Some(track) => track.duration_secs(),
        None => return unchanged(model),
    };

    let state = PlayerState {
        elapsed: Some(seconds.clamp(0.0, duration)),
        ..model.state
    };
    unchanged(Model { state, ..model })
}

fn ended(model: Model) -> (Model, Vec<Effect>) {
    if model.current_track().is_none() {
        return unchanged(model);
    }
    if neighbour(&model, Direction::Next).is_some() {
        return advance(model, Direction::Next);
    }

    let state = PlayerState {
        playing: false,
        ..model.state
    };
    unchanged(Model { state, ..model })
}
