//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, AppError>`; gallery errors map to status codes
//! through [`GalleryError::http_status`] and answer with a plain-text body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vitrine_core::GalleryError;

/// Body sent when an image has no annotation sidecar.
pub const METADATA_NOT_FOUND: &str = "Metadata not found";

/// Error returned by route handlers.
#[derive(Debug)]
pub enum AppError {
    /// Failure from the gallery pipeline
    Gallery(GalleryError),
    /// The request itself is unusable (bad multipart body, missing field)
    BadRequest(String),
}

impl From<GalleryError> for AppError {
    fn from(e: GalleryError) -> Self {
        Self::Gallery(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => {
                tracing::warn!("Bad request: {message}");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            AppError::Gallery(err) => {
                let status = StatusCode::from_u16(err.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(status = %status, error = %err, "Server error in handler");
                }
                let body = match err {
                    GalleryError::MetadataNotFound(_) => METADATA_NOT_FOUND.to_string(),
                    other => other.to_string(),
                };
                (status, body).into_response()
            }
        }
    }
}
