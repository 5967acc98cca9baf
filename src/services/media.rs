// Local media: turns uploaded bytes into a playable URL and probes its metadata

use std::fs;
use std::path::{Path, PathBuf};
use id3::{Tag, TagLike};
use log::{info, warn};
use uuid::Uuid;

use crate::error::MediaError;

const AUDIO_EXTENSIONS: [&str; 7] = ["mp3", "wav", "ogg", "flac", "m4a", "aac", "opus"];

// Rough estimate: MP3 at 128kbps = 16KB per second
const ESTIMATE_BYTES_PER_SECOND: f64 = 16000.0;

/// A file picked by the user for upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type,
            bytes,
        }
    }

    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    pub fn stem(&self) -> String {
        Path::new(&self.name)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Audio content types are accepted outright. Without a specific type the
    /// file extension decides.
    pub fn is_audio(&self) -> bool {
        let content_type = self
            .content_type
            .as_deref()
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("audio/") {
            return true;
        }

        let generic = content_type.is_empty() || content_type.starts_with("application/octet-stream");
        generic
            && self
                .extension()
                .map_or(false, |ext| AUDIO_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Media made playable by [`LocalMedia::import`]. Owned by the track built from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedMedia {
    pub url: String,
    pub path: PathBuf,
    /// Seconds, 0 when it could not be determined.
    pub duration: f64,
    pub title: Option<String>,
}

pub trait LocalMedia: Send + Sync {
    fn import(&self, file: &LocalFile) -> Result<ImportedMedia, MediaError>;

    fn release(&self, media: &ImportedMedia) -> Result<(), MediaError>;
}

/// Stores uploads as files and serves them under a public route.
pub struct UploadStore {
    dir: PathBuf,
    route: String,
}

impl UploadStore {
    pub fn new(dir: &Path, route: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            route: route.trim_end_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl LocalMedia for UploadStore {
    fn import(&self, file: &LocalFile) -> Result<ImportedMedia, MediaError> {
        if file.bytes.is_empty() {
            return Err(MediaError::Unsupported(format!("{} is empty", file.name)));
        }

        fs::create_dir_all(&self.dir)?;

        let extension = file.extension().unwrap_or_else(|| "mp3".to_string());
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = self.dir.join(&file_name);
        fs::write(&path, &file.bytes)?;

        let (title, duration) = extract_metadata(&path);

        info!("Stored upload {} as {} ({:.1}s)", file.name, path.display(), duration);

        Ok(ImportedMedia {
            url: format!("{}/{}", self.route, file_name),
            path,
            duration,
            title,
        })
    }

    fn release(&self, media: &ImportedMedia) -> Result<(), MediaError> {
        fs::remove_file(&media.path)?;
        info!("Released upload {}", media.path.display());
        Ok(())
    }
}

fn extract_metadata(file_path: &Path) -> (Option<String>, f64) {
    let title = match Tag::read_from_path(file_path) {
        Ok(tag) => tag.title().map(|t| t.to_string()).filter(|t| !t.trim().is_empty()),
        Err(e) => {
            info!("Could not read ID3 tags from {}: {}", file_path.display(), e);
            None
        }
    };

    let duration = match mp3_duration::from_path(file_path) {
        Ok(d) => d.as_secs_f64(),
        Err(e) => {
            info!("Could not get duration for {}: {}", file_path.display(), e);
            estimate_duration(file_path)
        }
    };

    (title, duration)
}

// Filesize fallback, only meaningful for MP3
fn estimate_duration(file_path: &Path) -> f64 {
    let is_mp3 = file_path
        .extension()
        .map_or(false, |ext| ext.to_string_lossy().eq_ignore_ascii_case("mp3"));
    if !is_mp3 {
        return 0.0;
    }

    match file_path.metadata() {
        Ok(metadata) => metadata.len() as f64 / ESTIMATE_BYTES_PER_SECOND,
        Err(e) => {
            warn!("Could not stat {}: {}", file_path.display(), e);
            0.0
        }
    }
}
