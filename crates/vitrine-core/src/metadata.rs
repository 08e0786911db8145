//! Annotation sidecars stored next to their images.
//!
//! `photos/cat.jpg` is annotated by `photos/cat.json` in the same bucket.

use crate::error::{GalleryError, GalleryResult};
use crate::format;
use crate::storage::ObjectStore;
use crate::types::Annotation;
use std::sync::Arc;

/// Extension of sidecar objects.
pub const SIDECAR_EXTENSION: &str = "json";

/// Content type declared on sidecar uploads.
pub const SIDECAR_MIME: &str = "application/json";

/// Derive the sidecar object name for an image.
///
/// Replaces the extension of the final path segment with `.json`, keeping
/// the base name as-is; names without an extension get `.json` appended.
/// A bare JPEG segment such as `.jpg` maps to `.json`.
pub fn sidecar_key(image_name: &str) -> String {
    match format::jpeg_extension(image_name).or_else(|| format::extension(image_name)) {
        Some(ext) => {
            let base = &image_name[..image_name.len() - ext.len()];
            format!("{base}{SIDECAR_EXTENSION}")
        }
        None => format!("{image_name}.{SIDECAR_EXTENSION}"),
    }
}

/// Reads and writes annotation sidecars through an object store.
#[derive(Clone)]
pub struct MetadataStore {
    store: Arc<dyn ObjectStore>,
}

impl MetadataStore {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Persist `annotation` as the sidecar of `image_name`, overwriting any
    /// previous one.
    pub async fn save(&self, image_name: &str, annotation: &Annotation) -> GalleryResult<()> {
        let key = sidecar_key(image_name);
        let body = serde_json::to_vec(annotation).map_err(|e| {
            GalleryError::storage(format!("Cannot serialize annotation for {image_name}: {e}"))
        })?;
        self.store.put(&key, body, SIDECAR_MIME).await?;
        tracing::debug!("Saved annotation for {image_name} as {key}");
        Ok(())
    }

    /// Load the sidecar of `image_name`.
    ///
    /// Returns `Ok(None)` when no sidecar exists; other store failures are
    /// errors.
    pub async fn load(&self, image_name: &str) -> GalleryResult<Option<Annotation>> {
        let key = sidecar_key(image_name);
        let bytes = match self.store.get(&key).await {
            Ok(bytes) => bytes,
            Err(GalleryError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };
        let annotation = serde_json::from_slice(&bytes).map_err(|e| {
            GalleryError::MalformedAnnotation {
                raw: String::from_utf8_lossy(&bytes).into_owned(),
                reason: format!("sidecar {key}: {e}"),
            }
        })?;
        Ok(Some(annotation))
    }
}
