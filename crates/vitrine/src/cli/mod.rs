//! Command implementations.

pub mod config;
pub mod gallery;
pub mod serve;

use anyhow::Context;
use std::path::Path;
use vitrine_core::Config;

/// Load configuration from `path`, or from the default location.
///
/// An explicitly requested file must load; a broken default file only
/// produces a warning and falls back to defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `vitrine config path`."
            );
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_explicit_config_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vitrine.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();
        assert_eq!(load_config(Some(&path)).unwrap().server.port, 9090);
    }
}
