use serde::{Serialize, Serializer};

/// View-layer predicate over the track list. On the wire `All` is `null`,
/// so every string, `"all"` included, stays available as an album name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AlbumFilter {
    #[default]
    All,
    Album(String),
}

impl AlbumFilter {
    /// A missing or blank value selects every album.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => AlbumFilter::All,
            Some(album) => AlbumFilter::Album(album.to_string()),
        }
    }

    pub fn album(&self) -> Option<&str> {
        match self {
            AlbumFilter::All => None,
            AlbumFilter::Album(name) => Some(name),
        }
    }

    pub fn matches(&self, album: &str) -> bool {
        match self {
            AlbumFilter::All => true,
            AlbumFilter::Album(name) => name == album,
        }
    }
}

impl Serialize for AlbumFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.album().serialize(serializer)
    }
}

/// The view-bound part of a player session. A new value replaces the old one
/// on every event.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub current: Option<String>,
    pub playing: bool,
    /// Seconds into the current track, `None` without a current track.
    pub elapsed: Option<f64>,
    pub filter: AlbumFilter,
}

impl PlayerState {
    /// Focus `id` from the start with autoplay.
    pub fn focused(self, id: &str) -> Self {
        Self {
            current: Some(id.to_string()),
            playing: true,
            elapsed: Some(0.0),
            ..self
        }
    }

    /// Drop the current track and stop.
    pub fn cleared(self) -> Self {
        Self {
            current: None,
            playing: false,
            elapsed: None,
            ..self
        }
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_deref() == Some(id)
    }
}
