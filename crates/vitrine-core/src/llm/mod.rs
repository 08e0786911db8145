//! LLM integration for image annotation.
//!
//! Provides a provider abstraction over Gemini and OpenAI-compatible
//! backends, and the [`InferenceClient`] that turns an image into a raw
//! completion string.

pub(crate) mod client;
pub(crate) mod gemini;
pub(crate) mod openai;
pub(crate) mod provider;

pub use client::InferenceClient;
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{
    ImageInput, LlmProvider, LlmProviderFactory, LlmRequest, LlmResponse, ANNOTATION_PROMPT,
};
