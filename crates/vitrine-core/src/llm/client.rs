//! Inference client: one image in, one completion string out.

use super::provider::{ImageInput, LlmProvider, LlmRequest};
use crate::config::LlmConfig;
use crate::error::{GalleryError, GalleryResult};

/// Wraps a provider with the fixed annotation request and the
/// blank-completion rule.
///
/// The returned text is not checked for JSON; extraction happens later.
pub struct InferenceClient {
    provider: Box<dyn LlmProvider>,
    config: LlmConfig,
}

impl InferenceClient {
    pub fn new(provider: Box<dyn LlmProvider>, config: LlmConfig) -> Self {
        Self { provider, config }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model requests are sent to.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Ask the provider for a title and description of `bytes`.
    ///
    /// Fails with `GalleryError::EmptyResponse` when the completion is blank.
    pub async fn complete(&self, bytes: &[u8], media_type: &str) -> GalleryResult<String> {
        let image = ImageInput::from_bytes(bytes, media_type);
        let request = LlmRequest::annotate_image(image, &self.config);

        let response = self.provider.generate(&request).await?;
        tracing::debug!(
            provider = self.provider.name(),
            model = %response.model,
            latency_ms = response.latency_ms,
            tokens = ?response.tokens_used,
            "Raw completion: {}",
            response.text
        );

        if response.text.trim().is_empty() {
            return Err(GalleryError::EmptyResponse);
        }
        Ok(response.text)
    }
}
