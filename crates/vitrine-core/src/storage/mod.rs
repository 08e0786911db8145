//! Object store abstraction over the gallery bucket.
//!
//! The gallery only needs three things from a bucket: enumerate names, write
//! a named blob, read a named blob. Backends implement [`ObjectStore`] and are
//! handed to the gallery as `Arc<dyn ObjectStore>`.

pub(crate) mod gcs;
pub(crate) mod local;
pub(crate) mod memory;

pub use gcs::GcsStore;
pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::config::{resolve_env_var, Config, StorageBackend};
use crate::error::{GalleryError, GalleryResult};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// A bucket of named binary objects.
///
/// Uses `async_trait` so the store can live behind `Arc<dyn ObjectStore>`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logging (e.g., "gcs", "local").
    fn name(&self) -> &str;

    /// Enumerate every object name. Order is backend-defined.
    async fn list(&self) -> GalleryResult<Vec<String>>;

    /// Create or overwrite an object.
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> GalleryResult<()>;

    /// Download an object, or `GalleryError::NotFound` if it does not exist.
    async fn get(&self, name: &str) -> GalleryResult<Vec<u8>>;
}

/// Builds the configured object store backend.
pub struct StoreFactory;

impl StoreFactory {
    pub fn create(config: &Config) -> GalleryResult<Arc<dyn ObjectStore>> {
        let storage = &config.storage;
        match storage.backend {
            StorageBackend::Gcs => {
                let bucket = resolve_env_var(&storage.bucket).ok_or_else(|| {
                    GalleryError::storage("Bucket name not set. Set BUCKET_NAME env var.")
                })?;
                let token = resolve_env_var(&storage.access_token);
                if token.is_none() {
                    tracing::warn!("No storage access token configured; requests are unauthenticated");
                }
                Ok(Arc::new(GcsStore::new(
                    &storage.endpoint,
                    &bucket,
                    token,
                    Duration::from_millis(storage.timeout_ms),
                )?))
            }
            StorageBackend::Local => {
                let dir = config.local_dir();
                tracing::debug!("Using local object store at {}", dir.display());
                Ok(Arc::new(LocalStore::new(dir)))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory object store; uploads are lost on exit");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}
