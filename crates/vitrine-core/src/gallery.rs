//! The gallery service: list, upload-and-annotate, render.
//!
//! Every operation is one straight sequence of awaited remote calls. Nothing
//! is retried and nothing is rolled back; a failure after the image upload
//! leaves the image stored without a sidecar.

use crate::error::{GalleryError, GalleryResult};
use crate::extract::{AnnotationExtractor, FencedJsonExtractor};
use crate::format::{self, JPEG_MIME};
use crate::llm::InferenceClient;
use crate::metadata::MetadataStore;
use crate::storage::ObjectStore;
use crate::types::{Annotation, GalleryEntry};
use std::sync::Arc;

/// Orchestrates the object store, the inference client and the extractor.
pub struct GalleryService {
    store: Arc<dyn ObjectStore>,
    metadata: MetadataStore,
    inference: InferenceClient,
    extractor: Box<dyn AnnotationExtractor>,
}

impl GalleryService {
    /// Build a service using the fence-tolerant JSON extractor.
    pub fn new(store: Arc<dyn ObjectStore>, inference: InferenceClient) -> Self {
        Self::with_extractor(store, inference, Box::new(FencedJsonExtractor))
    }

    pub fn with_extractor(
        store: Arc<dyn ObjectStore>,
        inference: InferenceClient,
        extractor: Box<dyn AnnotationExtractor>,
    ) -> Self {
        Self {
            metadata: MetadataStore::new(store.clone()),
            store,
            inference,
            extractor,
        }
    }

    /// Names of all JPEG objects in the bucket, in store order.
    pub async fn list_images(&self) -> GalleryResult<Vec<String>> {
        let names = self.store.list().await?;
        let images: Vec<String> = names
            .into_iter()
            .filter(|name| format::is_jpeg_name(name))
            .collect();
        tracing::debug!("{} images in {} store", images.len(), self.store.name());
        Ok(images)
    }

    /// Store an uploaded JPEG, annotate it, and store the annotation.
    pub async fn upload_and_annotate(&self, name: &str, bytes: Vec<u8>) -> GalleryResult<Annotation> {
        format::ensure_jpeg(name, &bytes)?;

        let size = bytes.len();
        self.store.put(name, bytes.clone(), JPEG_MIME).await?;
        tracing::info!("Uploaded {name} ({size} bytes) to {} store", self.store.name());

        let annotation = match self.describe(&bytes).await {
            Ok(annotation) => annotation,
            Err(e) => {
                tracing::error!("Annotation failed for {name}; image stays unannotated: {e}");
                return Err(e);
            }
        };

        self.metadata.save(name, &annotation).await?;
        tracing::info!("Annotated {name}: {:?}", annotation.title);
        Ok(annotation)
    }

    /// Run inference and extraction on image bytes without storing anything.
    pub async fn describe(&self, bytes: &[u8]) -> GalleryResult<Annotation> {
        let completion = self.inference.complete(bytes, JPEG_MIME).await?;
        self.extractor.extract(&completion).inspect_err(|e| {
            if let GalleryError::MalformedAnnotation { raw, reason } = e {
                tracing::warn!("Could not extract annotation ({reason}) from: {raw}");
            }
        })
    }

    /// Fetch an image together with its annotation.
    ///
    /// A missing image is `NotFound`; an image without a sidecar is
    /// `MetadataNotFound`.
    pub async fn render_image(&self, name: &str) -> GalleryResult<GalleryEntry> {
        let bytes = self.store.get(name).await?;
        let annotation = self
            .metadata
            .load(name)
            .await?
            .ok_or_else(|| GalleryError::MetadataNotFound(name.to_string()))?;
        Ok(GalleryEntry {
            name: name.to_string(),
            bytes,
            annotation,
        })
    }

    /// Raw image bytes, fetched from the store on every call.
    pub async fn fetch_image(&self, name: &str) -> GalleryResult<Vec<u8>> {
        self.store.get(name).await
    }

    /// Stored annotation of an image, if any.
    pub async fn annotation(&self, name: &str) -> GalleryResult<Option<Annotation>> {
        self.metadata.load(name).await
    }

    /// Name of the inference provider in use.
    pub fn provider_name(&self) -> &str {
        self.inference.provider_name()
    }

    /// Model used for annotation.
    pub fn model(&self) -> &str {
        self.inference.model()
    }
}
