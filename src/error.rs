use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Track API answered with status {0}")]
    Status(u16),

    #[error("Track not found")]
    NotFound,

    #[error("Upload exceeds the size limit")]
    TooLarge,
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (status, message) = match self {
            AppError::NotFound => (Status::NotFound, "Track not found"),
            AppError::TooLarge => (Status::PayloadTooLarge, "Upload too large"),
            AppError::Io(_) => (Status::InternalServerError, "IO error"),
            AppError::Serialization(_) => (Status::BadRequest, "Invalid data"),
            AppError::Http(_) | AppError::Status(_) => (Status::BadGateway, "Track API unavailable"),
        };

        if status.code >= 500 {
            log::error!("{} {}: {}", req.method(), req.uri(), self);
        }

        (status, Json(serde_json::json!({ "error": message }))).respond_to(req)
    }
}

/// Failures reported by the playback engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The engine refused the command (full command backlog, blocked autoplay).
    #[error("Playback rejected: {0}")]
    Rejected(String),
}

/// Failures of the local media capability.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported media: {0}")]
    Unsupported(String),
}
