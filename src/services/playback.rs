// Playback capability and the command queue drained by the player page

use std::collections::VecDeque;
use std::sync::Arc;
use parking_lot::Mutex;
use serde::Serialize;
use log::debug;

use crate::error::PlaybackError;

/// The audio engine the player commands. Position and end-of-track are
/// reported back as player events.
pub trait Playback: Send {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError>;

    fn play(&mut self) -> Result<(), PlaybackError>;

    fn pause(&mut self) -> Result<(), PlaybackError>;

    /// Jump to `seconds` into the loaded source.
    fn seek(&mut self, seconds: f64) -> Result<(), PlaybackError>;

    /// Pause and let go of the loaded source.
    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.pause()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlaybackCommand {
    Load { url: String },
    Play,
    Pause,
    Seek { seconds: f64 },
    Stop,
}

/// Bounded queue of commands for the browser's audio element.
#[derive(Clone)]
pub struct CommandQueue {
    pending: Arc<Mutex<VecDeque<PlaybackCommand>>>,
    capacity: usize,
}

impl CommandQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            pending: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    fn push(&self, command: PlaybackCommand) -> Result<(), PlaybackError> {
        let mut pending = self.pending.lock();

        // A new source makes everything queued for the previous one obsolete
        if matches!(command, PlaybackCommand::Load { .. }) && !pending.is_empty() {
            debug!("Dropping {} superseded playback commands", pending.len());
            pending.clear();
        }

        if pending.len() >= self.capacity {
            return Err(PlaybackError::Rejected(format!(
                "{} commands already pending",
                pending.len()
            )));
        }

        pending.push_back(command);
        Ok(())
    }

    /// Take every pending command, oldest first.
    pub fn drain(&self) -> Vec<PlaybackCommand> {
        self.pending.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Playback for CommandQueue {
    fn load(&mut self, url: &str) -> Result<(), PlaybackError> {
        self.push(PlaybackCommand::Load { url: url.to_string() })
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.push(PlaybackCommand::Play)
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.push(PlaybackCommand::Pause)
    }

    fn seek(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        self.push(PlaybackCommand::Seek { seconds })
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.push(PlaybackCommand::Stop)
    }
}
