//! Filesystem-backed object store.
//!
//! A directory stands in for the bucket; object names are relative paths
//! below it using `/` as separator.

use super::ObjectStore;
use crate::error::{GalleryError, GalleryResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Object store rooted at a local directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Map an object name to a path under the root, rejecting names that
    /// would escape it.
    fn object_path(&self, name: &str) -> GalleryResult<PathBuf> {
        let relative = Path::new(name);
        let valid = !name.is_empty()
            && !name.contains('\\')
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(GalleryError::storage(format!(
                "Invalid object name for local store: {name:?}"
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    async fn list(&self) -> GalleryResult<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let root = self.root.clone();
        let names = tokio::task::spawn_blocking(move || {
            let mut names: Vec<String> = WalkDir::new(&root)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|e| {
                    let relative = e.path().strip_prefix(&root).ok()?;
                    let parts: Vec<&str> = relative
                        .components()
                        .map(|c| c.as_os_str().to_str())
                        .collect::<Option<_>>()?;
                    Some(parts.join("/"))
                })
                .collect();
            names.sort();
            names
        })
        .await
        .map_err(|e| GalleryError::storage(format!("Listing task failed: {e}")))?;

        Ok(names)
    }

    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> GalleryResult<()> {
        let path = self.object_path(name)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GalleryError::storage(format!("Cannot create {}: {e}", parent.display()))
            })?;
        }
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| GalleryError::storage(format!("Cannot write {}: {e}", path.display())))?;
        tracing::debug!("Stored {name} ({content_type}) at {}", path.display());
        Ok(())
    }

    async fn get(&self, name: &str) -> GalleryResult<Vec<u8>> {
        let path = self.object_path(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(GalleryError::NotFound(name.to_string()))
            }
            Err(e) => Err(GalleryError::storage(format!(
                "Cannot read {}: {e}",
                path.display()
            ))),
        }
    }
}
