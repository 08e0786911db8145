//! Turning a free-form completion into an [`Annotation`].
//!
//! Models asked for "strictly JSON" still like to wrap the payload in a
//! markdown code fence, sometimes with a sentence of prose around it.

use crate::error::{GalleryError, GalleryResult};
use crate::types::Annotation;

const FENCE: &str = "```";

/// Extracts a structured annotation from completion text.
pub trait AnnotationExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> GalleryResult<Annotation>;
}

/// Fence-tolerant JSON extractor.
///
/// Accepts bare JSON or JSON inside a ```` ``` ```` / ```` ```json ```` fence.
/// Text that already parses as JSON is taken as-is, so backticks inside
/// string values are never mistaken for a fence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FencedJsonExtractor;

impl AnnotationExtractor for FencedJsonExtractor {
    fn extract(&self, raw: &str) -> GalleryResult<Annotation> {
        let malformed = |reason: String| GalleryError::MalformedAnnotation {
            raw: raw.to_string(),
            reason,
        };

        let value: serde_json::Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(_) => serde_json::from_str(strip_fences(raw))
                .map_err(|e| malformed(format!("invalid JSON: {e}")))?,
        };
        if !value.is_object() {
            return Err(malformed("expected a JSON object".to_string()));
        }
        serde_json::from_value(value).map_err(|e| malformed(e.to_string()))
    }
}

/// Return the payload inside the first code fence, or the trimmed text when
/// there is no fence.
///
/// The fence's language tag is dropped only when it is `json`
/// (case-insensitive). An unterminated fence runs to the end of the text.
pub fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };

    let mut body = &text[open + FENCE.len()..];
    if body.get(..4).is_some_and(|tag| tag.eq_ignore_ascii_case("json")) {
        body = &body[4..];
    }
    let body = match body.find(FENCE) {
        Some(close) => &body[..close],
        None => body,
    };
    body.trim()
}
