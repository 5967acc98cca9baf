//! Player controller: owns the track collection and the playback state.
//!
//! `reducer` holds the pure transition function, `controller` executes its
//! effects against the playback and local-media capabilities, and `session`
//! shares one controller between HTTP requests.

pub mod controller;
pub mod reducer;
pub mod session;
pub mod views;

pub use controller::{PlayerController, Snapshot};
pub use reducer::{reduce, Direction, Effect, Event, Model};
pub use session::PlayerSession;
