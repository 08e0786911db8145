//! Core data types for the gallery.

use serde::{Deserialize, Serialize};

/// Title and description generated for one image.
///
/// Persisted as the image's JSON sidecar. Fields the model returns beyond
/// `title` and `description` are kept in `extra` so they survive a
/// save/load round trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Short title
    pub title: String,

    /// Free-text description
    pub description: String,

    /// Any other fields present in the model output
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Annotation {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// An image paired with its annotation, ready for rendering.
///
/// Derived on read; never stored.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    /// Object name of the image
    pub name: String,

    /// Raw image bytes
    pub bytes: Vec<u8>,

    /// The image's annotation
    pub annotation: Annotation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_serializes_flat() {
        let mut annotation = Annotation::new("Cat", "A cat on a mat.");
        annotation
            .extra
            .insert("mood".into(), serde_json::json!("sleepy"));
        let value = serde_json::to_value(&annotation).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Cat",
                "description": "A cat on a mat.",
                "mood": "sleepy"
            })
        );
    }
}
