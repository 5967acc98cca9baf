pub mod catalog;
pub mod consent;
pub mod media;
pub mod playback;
pub mod track_source;
