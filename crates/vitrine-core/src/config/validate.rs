//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

const KNOWN_PROVIDERS: &[&str] = &["gemini", "openai"];

/// Largest accepted `server.max_upload_mb`.
const MAX_UPLOAD_MB: u64 = 1024;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        if self.server.max_upload_mb == 0 || self.server.max_upload_mb > MAX_UPLOAD_MB {
            return Err(ConfigError::ValidationError(format!(
                "server.max_upload_mb must be between 1 and {MAX_UPLOAD_MB}"
            )));
        }
        if self.storage.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "storage.timeout_ms must be > 0".into(),
            ));
        }
        if self.llm.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "llm.timeout_ms must be > 0".into(),
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "llm.max_tokens must be > 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::ValidationError(
                "llm.temperature must be between 0.0 and 2.0".into(),
            ));
        }
        if !KNOWN_PROVIDERS.contains(&self.llm.provider.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "llm.provider must be one of {}, got '{}'",
                KNOWN_PROVIDERS.join(", "),
                self.llm.provider
            )));
        }
        Ok(())
    }
}
