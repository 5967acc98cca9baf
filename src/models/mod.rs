pub mod player;
pub mod track;

pub use player::{AlbumFilter, PlayerState};
pub use track::{Origin, Track};
