//! LLM provider trait and request/response types.
//!
//! Defines the interface that all providers implement, plus the factory
//! that creates the configured provider.

use crate::config::{resolve_env_var, LlmConfig};
use crate::error::{GalleryError, GalleryResult};
use async_trait::async_trait;
use base64::Engine;
use std::time::Duration;

/// Instruction sent with every image.
pub const ANNOTATION_PROMPT: &str = "Generate a short title and a description for this image. \
     Respond strictly in JSON format with 'title' and 'description' fields.";

/// Base64-encoded image ready to send to an LLM API.
#[derive(Debug, Clone)]
pub struct ImageInput {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg")
    pub media_type: String,
}

impl ImageInput {
    /// Create an `ImageInput` from raw bytes and a MIME type.
    pub fn from_bytes(bytes: &[u8], media_type: &str) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Return a data URL suitable for OpenAI-style APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// A request to annotate an image.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The image to annotate
    pub image: ImageInput,
    /// Text prompt for the model
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
}

impl LlmRequest {
    /// Build the fixed title-and-description request for an image.
    pub fn annotate_image(image: ImageInput, config: &LlmConfig) -> Self {
        Self {
            image,
            prompt: ANNOTATION_PROMPT.to_string(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// The response from an LLM call.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text, untrimmed
    pub text: String,
    /// Model identifier used
    pub model: String,
    /// Number of tokens used (input + output), if reported
    pub tokens_used: Option<u32>,
    /// Round-trip latency in milliseconds
    pub latency_ms: u64,
}

/// Trait that all LLM providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn LlmProvider>` for dynamic dispatch).
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name for logging (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Model the provider sends requests to.
    fn model(&self) -> &str;

    /// Generate a completion for the given request.
    async fn generate(&self, request: &LlmRequest) -> GalleryResult<LlmResponse>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Factory that creates the configured provider.
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Create an LLM provider from config, with an optional model override.
    pub fn create(
        config: &LlmConfig,
        model_override: Option<&str>,
    ) -> GalleryResult<Box<dyn LlmProvider>> {
        let timeout = Duration::from_millis(config.timeout_ms);
        match config.provider.as_str() {
            "gemini" => {
                let cfg = &config.gemini;
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| {
                    GalleryError::llm("Gemini API key not set. Set GEMINI_API env var.")
                })?;
                let model = model_override.unwrap_or(&cfg.model);
                Ok(Box::new(super::gemini::GeminiProvider::new(
                    &cfg.endpoint,
                    &api_key,
                    model,
                    timeout,
                )))
            }
            "openai" => {
                let cfg = &config.openai;
                let api_key = resolve_env_var(&cfg.api_key).ok_or_else(|| {
                    GalleryError::llm("OpenAI API key not set. Set OPENAI_API_KEY env var.")
                })?;
                let model = model_override.unwrap_or(&cfg.model);
                Ok(Box::new(super::openai::OpenAiProvider::new(
                    &cfg.endpoint,
                    &api_key,
                    model,
                    timeout,
                )))
            }
            other => Err(GalleryError::llm(format!("Unknown LLM provider: {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_input_from_bytes() {
        let input = ImageInput::from_bytes(&[0xFF, 0xD8, 0xFF], "image/jpeg");
        assert_eq!(input.media_type, "image/jpeg");
        assert_eq!(input.data, "/9j/");
    }

    #[test]
    fn test_image_input_data_url() {
        let input = ImageInput::from_bytes(&[1, 2, 3], "image/jpeg");
        assert!(input.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_annotate_request_uses_fixed_prompt() {
        let image = ImageInput::from_bytes(&[1, 2, 3], "image/jpeg");
        let request = LlmRequest::annotate_image(image, &LlmConfig::default());
        assert!(request.prompt.contains("strictly in JSON"));
        assert!(request.prompt.contains("'title'"));
        assert_eq!(request.max_tokens, 8192);
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let config = LlmConfig {
            provider: "mystery".into(),
            ..LlmConfig::default()
        };
        let err = LlmProviderFactory::create(&config, None).err().unwrap();
        assert!(err.to_string().contains("Unknown LLM provider"));
    }

    #[test]
    fn test_factory_requires_api_key() {
        let mut config = LlmConfig::default();
        config.gemini.api_key = "${DEFINITELY_NOT_SET_VITRINE_KEY}".into();
        let err = LlmProviderFactory::create(&config, None).err().unwrap();
        assert!(err.to_string().contains("GEMINI_API"));
    }

    #[test]
    fn test_factory_builds_gemini_with_literal_key() {
        let mut config = LlmConfig::default();
        config.gemini.api_key = "literal-key".into();
        let provider = LlmProviderFactory::create(&config, Some("gemini-2.0-flash")).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-2.0-flash");
        assert_eq!(provider.timeout(), Duration::from_millis(60_000));
    }
}
