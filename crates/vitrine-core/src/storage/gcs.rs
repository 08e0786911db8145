//! Google Cloud Storage backend using the JSON API.
//!
//! Objects are listed with `GET /storage/v1/b/{bucket}/o`, downloaded with
//! `?alt=media` and uploaded through the simple media upload endpoint.

use super::ObjectStore;
use crate::error::{GalleryError, GalleryResult};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;

/// Bucket client for Google Cloud Storage.
pub struct GcsStore {
    endpoint: Url,
    bucket: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl GcsStore {
    /// Create a client for `bucket` at `endpoint`.
    ///
    /// `access_token` is sent as an OAuth bearer token when present; emulators
    /// typically accept unauthenticated requests.
    pub fn new(
        endpoint: &str,
        bucket: &str,
        access_token: Option<String>,
        timeout: Duration,
    ) -> GalleryResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| GalleryError::storage(format!("Invalid storage endpoint {endpoint}: {e}")))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GalleryError::storage(format!("Cannot build HTTP client: {e}")))?;
        Ok(Self {
            endpoint,
            bucket: bucket.to_string(),
            access_token,
            client,
        })
    }

    /// Build `{endpoint}/{segments...}` with each segment percent-encoded.
    fn url(&self, segments: &[&str]) -> GalleryResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                GalleryError::storage(format!("Storage endpoint cannot be a base: {}", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        what: &str,
    ) -> GalleryResult<reqwest::Response> {
        self.authorize(builder)
            .send()
            .await
            .map_err(|e| GalleryError::storage(format!("GCS {what} request failed: {e}")))
    }
}

/// Convert a non-success response into a storage error.
async fn status_error(resp: reqwest::Response, what: &str) -> GalleryError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    GalleryError::Storage {
        message: format!("GCS {what} HTTP {status}: {text}"),
        status_code: Some(status.as_u16()),
    }
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    items: Vec<ObjectResource>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
struct ObjectResource {
    name: String,
}

#[async_trait]
impl ObjectStore for GcsStore {
    fn name(&self) -> &str {
        "gcs"
    }

    async fn list(&self) -> GalleryResult<Vec<String>> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o"])?;
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .client
                .get(url.clone())
                .query(&[("fields", "items(name),nextPageToken")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let resp = self.send(request, "list").await?;
            if !resp.status().is_success() {
                return Err(status_error(resp, "list").await);
            }
            let page: ListResponse = resp.json().await.map_err(|e| {
                GalleryError::storage(format!("Failed to parse GCS list response: {e}"))
            })?;

            names.extend(page.items.into_iter().map(|o| o.name));
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        tracing::debug!("Listed {} objects in gs://{}", names.len(), self.bucket);
        Ok(names)
    }

    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> GalleryResult<()> {
        let url = self.url(&["upload", "storage", "v1", "b", &self.bucket, "o"])?;
        let size = bytes.len();
        let request = self
            .client
            .post(url)
            .query(&[("uploadType", "media"), ("name", name)])
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);

        let resp = self.send(request, "upload").await?;
        if !resp.status().is_success() {
            return Err(status_error(resp, "upload").await);
        }
        tracing::debug!("Uploaded gs://{}/{name} ({size} bytes)", self.bucket);
        Ok(())
    }

    async fn get(&self, name: &str) -> GalleryResult<Vec<u8>> {
        let url = self.url(&["storage", "v1", "b", &self.bucket, "o", name])?;
        let request = self.client.get(url).query(&[("alt", "media")]);

        let resp = self.send(request, "download").await?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GalleryError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(status_error(resp, "download").await);
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| GalleryError::storage(format!("Failed to read GCS object {name}: {e}")))?;
        Ok(bytes.to_vec())
    }
}
