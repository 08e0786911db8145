//! In-memory object store.
//!
//! Keeps objects in insertion order, which makes it handy for tests that
//! assert on store-defined ordering.

use super::ObjectStore;
use crate::error::{GalleryError, GalleryResult};
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredObject {
    name: String,
    bytes: Vec<u8>,
    content_type: String,
}

/// Object store backed by process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<Vec<StoredObject>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type recorded for an object, if present.
    pub fn content_type(&self, name: &str) -> Option<String> {
        self.objects
            .read()
            .ok()?
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.content_type.clone())
    }

    fn poisoned() -> GalleryError {
        GalleryError::storage("memory store lock poisoned")
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list(&self) -> GalleryResult<Vec<String>> {
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        Ok(objects.iter().map(|o| o.name.clone()).collect())
    }

    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> GalleryResult<()> {
        let mut objects = self.objects.write().map_err(|_| Self::poisoned())?;
        let object = StoredObject {
            name: name.to_string(),
            bytes,
            content_type: content_type.to_string(),
        };
        match objects.iter_mut().find(|o| o.name == name) {
            Some(existing) => *existing = object,
            None => objects.push(object),
        }
        Ok(())
    }

    async fn get(&self, name: &str) -> GalleryResult<Vec<u8>> {
        let objects = self.objects.read().map_err(|_| Self::poisoned())?;
        objects
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.bytes.clone())
            .ok_or_else(|| GalleryError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_and_overwrite() {
        let store = MemoryStore::new();
        store.put("a.jpg", vec![1], "image/jpeg").await.unwrap();
        store.put("b.json", vec![2], "application/json").await.unwrap();
        store.put("a.jpg", vec![3], "image/jpeg").await.unwrap();

        assert_eq!(store.get("a.jpg").await.unwrap(), vec![3]);
        assert_eq!(store.list().await.unwrap(), vec!["a.jpg", "b.json"]);
        assert_eq!(store.content_type("b.json").as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.get("ghost.jpg").await.unwrap_err();
        assert!(matches!(err, GalleryError::NotFound(ref n) if n == "ghost.jpg"));
    }
}
