// Where the player gets its track list from

use std::sync::Arc;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::Track;
use crate::services::catalog::Catalog;

#[async_trait]
pub trait TrackSource: Send + Sync {
    /// The ordered track list.
    async fn fetch_tracks(&self) -> Result<Vec<Track>>;
}

/// Reads the catalog served by this process.
pub struct CatalogSource {
    catalog: Arc<Catalog>,
}

impl CatalogSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl TrackSource for CatalogSource {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.catalog.tracks().to_vec())
    }
}

/// `GET {base}/api/tracks` on a remote track API.
pub struct HttpTrackSource {
    http: Client,
    base_url: String,
}

impl HttpTrackSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn tracks_url(&self) -> String {
        format!("{}/api/tracks", self.base_url)
    }
}

#[async_trait]
impl TrackSource for HttpTrackSource {
    async fn fetch_tracks(&self) -> Result<Vec<Track>> {
        let url = self.tracks_url();
        debug!("Fetching tracks from {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status(status.as_u16()));
        }

        let tracks = response.json::<Vec<Track>>().await?;
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_url_normalizes_trailing_slash() {
        let source = HttpTrackSource::new("http://localhost:3000/");
        assert_eq!(source.tracks_url(), "http://localhost:3000/api/tracks");
    }

    #[tokio::test]
    async fn test_catalog_source_returns_catalog_order() {
        let source = CatalogSource::new(Arc::new(Catalog::mock()));
        let tracks = source.fetch_tracks().await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "1");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        // Port 9 (discard) is not expected to run an HTTP server
        let source = HttpTrackSource::new("http://127.0.0.1:9");
        assert!(source.fetch_tracks().await.is_err());
    }
}
