use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::config;

/// Where a track's media comes from. Uploaded media is owned by the player
/// session and must be released when the track goes away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Remote,
    Upload,
}

/// A playable item as served by `/api/tracks`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Seconds. Any JSON number is accepted; negative or non-finite values read as 0.
    #[serde(default, deserialize_with = "seconds")]
    pub duration: f64,
    pub url: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(skip)]
    pub origin: Origin,
}

impl Track {
    pub fn remote(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        duration: f64,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: album.into(),
            duration: sanitize_seconds(duration),
            url: url.into(),
            created_at: Utc::now(),
            origin: Origin::Remote,
        }
    }

    /// Builds a track for a freshly uploaded file with a new identifier and the
    /// upload sentinels for artist and album.
    pub fn uploaded(title: impl Into<String>, duration: f64, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            artist: config::UPLOADED_ARTIST.to_string(),
            album: config::UPLOADED_ALBUM.to_string(),
            duration: sanitize_seconds(duration),
            url: url.into(),
            created_at: Utc::now(),
            origin: Origin::Upload,
        }
    }

    pub fn is_uploaded(&self) -> bool {
        self.origin == Origin::Upload
    }

    /// Duration usable as a clamp bound, never negative or NaN.
    pub fn duration_secs(&self) -> f64 {
        sanitize_seconds(self.duration)
    }
}

fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    f64::deserialize(deserializer).map(sanitize_seconds)
}
