//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Largest accepted upload body in megabytes
    pub max_upload_mb: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_mb: 20,
        }
    }
}

/// Which object store implementation backs the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Google Cloud Storage JSON API
    Gcs,
    /// A directory on the local filesystem
    Local,
    /// Process memory; contents vanish on exit
    Memory,
}

/// Object store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection
    pub backend: StorageBackend,

    /// Bucket name (supports ${ENV_VAR} syntax)
    pub bucket: String,

    /// Storage API base URL (override for emulators)
    pub endpoint: String,

    /// OAuth bearer token (supports ${ENV_VAR} syntax, may be empty)
    pub access_token: String,

    /// Root directory for the local backend
    pub local_dir: PathBuf,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Gcs,
            bucket: "${BUCKET_NAME}".to_string(),
            endpoint: "https://storage.googleapis.com".to_string(),
            access_token: "${GCS_ACCESS_TOKEN}".to_string(),
            local_dir: PathBuf::from("~/.vitrine/bucket"),
            timeout_ms: 30_000,
        }
    }
}

/// Inference provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider identifier ("gemini" or "openai")
    pub provider: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Gemini configuration
    pub gemini: GeminiConfig,

    /// OpenAI-compatible configuration
    pub openai: OpenAiConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            timeout_ms: 60_000,
            max_tokens: 8192,
            temperature: 1.0,
            gemini: GeminiConfig::default(),
            openai: OpenAiConfig::default(),
        }
    }
}

/// Gemini configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// Generative Language API base URL
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            api_key: "${GEMINI_API}".to_string(),
            model: "gemini-1.5-flash".to_string(),
        }
    }
}

/// OpenAI-compatible Chat Completions configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// API base URL; `/chat/completions` is appended
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// Model name
    pub model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1".to_string(),
            api_key: "${OPENAI_API_KEY}".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
