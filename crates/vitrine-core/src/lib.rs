//! Vitrine Core - annotated image gallery library.
//!
//! Vitrine stores uploaded JPEGs in an object store bucket, asks a
//! multimodal LLM for a title and description of each one, and keeps the
//! result as a JSON sidecar next to the image.
//!
//! # Architecture
//!
//! ```text
//! upload → ObjectStore::put → InferenceClient → AnnotationExtractor → MetadataStore::save
//! render → ObjectStore::get + MetadataStore::load → GalleryEntry
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use vitrine_core::{Config, Vitrine};
//!
//! #[tokio::main]
//! async fn main() -> vitrine_core::Result<()> {
//!     let vitrine = Vitrine::new(Config::load()?)?;
//!     let annotation = vitrine
//!         .gallery()
//!         .upload_and_annotate("cat.jpg", std::fs::read("cat.jpg")?)
//!         .await?;
//!     println!("{}", annotation.title);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod gallery;
pub mod llm;
pub mod metadata;
pub mod storage;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, GalleryError, GalleryResult, Result, VitrineError};
pub use extract::{AnnotationExtractor, FencedJsonExtractor};
pub use gallery::GalleryService;
pub use llm::{InferenceClient, LlmProvider, LlmProviderFactory};
pub use metadata::{sidecar_key, MetadataStore};
pub use storage::{ObjectStore, StoreFactory};
pub use types::{Annotation, GalleryEntry};

use std::sync::Arc;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vitrine instance: configuration plus the gallery service built from it.
pub struct Vitrine {
    config: Config,
    gallery: Arc<GalleryService>,
}

impl Vitrine {
    /// Build the configured store and inference clients and wire them into
    /// a gallery service.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_model(config, None)
    }

    /// Like [`Vitrine::new`], but annotates with `model` instead of the
    /// configured provider model when given.
    pub fn with_model(config: Config, model: Option<&str>) -> Result<Self> {
        tracing::debug!("Initializing Vitrine v{}", VERSION);
        let store = StoreFactory::create(&config)?;
        let provider = LlmProviderFactory::create(&config.llm, model)?;
        let inference = InferenceClient::new(provider, config.llm.clone());
        tracing::info!(
            "Using {} store with {} provider ({})",
            store.name(),
            inference.provider_name(),
            inference.model()
        );
        let gallery = Arc::new(GalleryService::new(store, inference));
        Ok(Self { config, gallery })
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared handle to the gallery service.
    pub fn gallery(&self) -> Arc<GalleryService> {
        self.gallery.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_vitrine_new_with_memory_store() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.llm.gemini.api_key = "literal-key".into();
        let vitrine = Vitrine::new(config).unwrap();
        assert_eq!(vitrine.gallery().provider_name(), "gemini");
        assert_eq!(vitrine.config().server.port, 8080);
    }

    #[test]
    fn test_vitrine_with_model_override() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.llm.gemini.api_key = "literal-key".into();
        let vitrine = Vitrine::with_model(config, Some("gemini-2.0-flash")).unwrap();
        assert_eq!(vitrine.gallery().provider_name(), "gemini");
        assert_eq!(vitrine.gallery().model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_vitrine_new_without_api_key_fails() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.llm.gemini.api_key = "${DEFINITELY_NOT_SET_VITRINE_KEY}".into();
        assert!(matches!(
            Vitrine::new(config),
            Err(VitrineError::Gallery(GalleryError::Llm { .. }))
        ));
    }
}
