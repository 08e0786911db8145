//! Error types for the Vitrine gallery.
//!
//! Errors are split by concern so callers can tell a missing sidecar apart
//! from a missing image or a failed remote call.

use thiserror::Error;

/// Top-level error type for Vitrine operations.
#[derive(Error, Debug)]
pub enum VitrineError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Gallery pipeline errors
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised by the upload-and-annotate pipeline and its collaborators.
#[derive(Error, Debug)]
pub enum GalleryError {
    /// The inference call returned a blank completion
    #[error("Empty response from inference provider")]
    EmptyResponse,

    /// The completion could not be turned into an annotation
    #[error("Malformed annotation ({reason}): {raw}")]
    MalformedAnnotation { raw: String, reason: String },

    /// Requested object does not exist in the store
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The image exists but has no annotation sidecar
    #[error("Metadata not found for {0}")]
    MetadataNotFound(String),

    /// Upload rejected by the format check
    #[error("Unsupported format for {name}: {reason}")]
    UnsupportedFormat { name: String, reason: String },

    /// Object store transport or protocol failure
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        status_code: Option<u16>,
    },

    /// Inference transport or protocol failure
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },
}

impl GalleryError {
    pub(crate) fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            status_code: None,
        }
    }

    pub(crate) fn llm(message: impl Into<String>) -> Self {
        Self::Llm {
            message: message.into(),
            status_code: None,
        }
    }

    /// HTTP status a web surface should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) | Self::MetadataNotFound(_) => 404,
            Self::UnsupportedFormat { .. } => 400,
            Self::EmptyResponse
            | Self::MalformedAnnotation { .. }
            | Self::Storage { .. }
            | Self::Llm { .. } => 500,
        }
    }
}

/// Convenience type alias for Vitrine results.
pub type Result<T> = std::result::Result<T, VitrineError>;

/// Convenience type alias for gallery-specific results.
pub type GalleryResult<T> = std::result::Result<T, GalleryError>;
