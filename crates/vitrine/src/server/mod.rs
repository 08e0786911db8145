//! HTTP surface of the gallery.

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use vitrine_core::{Config, GalleryService};

pub mod error;
pub mod pages;
pub mod routes;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub gallery: Arc<GalleryService>,
    pub config: Arc<Config>,
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let upload_limit = upload_limit_bytes(ctx.config.server.max_upload_mb);

    Router::new()
        .route("/health", get(health_check))
        .merge(routes::gallery_routes())
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Request body limit in bytes, clamped to what `usize` can hold.
fn upload_limit_bytes(max_upload_mb: u64) -> usize {
    usize::try_from(max_upload_mb.saturating_mul(1024 * 1024)).unwrap_or(usize::MAX)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Start the HTTP server and run until Ctrl+C / SIGTERM.
pub async fn start_server(config: Config, gallery: Arc<GalleryService>) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext {
        gallery,
        config: Arc::new(config),
    };
    let app = create_router(ctx);

    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;
    use vitrine_core::llm::{LlmProvider, LlmRequest, LlmResponse};
    use vitrine_core::storage::MemoryStore;
    use vitrine_core::{GalleryError, GalleryResult, InferenceClient, ObjectStore};

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    const BOUNDARY: &str = "vitrine-test-boundary";

    /// Provider that always answers with the same completion or error.
    struct StubProvider(Result<String, String>);

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-v1"
        }

        async fn generate(&self, _request: &LlmRequest) -> GalleryResult<LlmResponse> {
            match &self.0 {
                Ok(text) => Ok(LlmResponse {
                    text: text.clone(),
                    model: "stub-v1".to_string(),
                    tokens_used: None,
                    latency_ms: 0,
                }),
                Err(message) => Err(GalleryError::Llm {
                    message: message.clone(),
                    status_code: Some(500),
                }),
            }
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(1)
        }
    }

    fn app_with(store: Arc<MemoryStore>, reply: Result<&str, &str>) -> Router {
        let config = Config::default();
        let provider = StubProvider(reply.map(String::from).map_err(String::from));
        let inference = InferenceClient::new(Box::new(provider), config.llm.clone());
        let ctx = AppContext {
            gallery: Arc::new(GalleryService::new(store, inference)),
            config: Arc::new(config),
        };
        create_router(ctx)
    }

    fn app(store: Arc<MemoryStore>) -> Router {
        app_with(
            store,
            Ok("```json\n{\"title\":\"Cat\",\"description\":\"A <small> cat.\"}\n```"),
        )
    }

    fn multipart_upload(field: &str, file_name: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(body: Body) -> Vec<u8> {
        body.collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_to_string(body: Body) -> String {
        String::from_utf8(body_bytes(body).await).unwrap()
    }

    #[test]
    fn test_upload_limit_bytes_saturates() {
        assert_eq!(upload_limit_bytes(20), 20 * 1024 * 1024);
        assert_eq!(upload_limit_bytes(u64::MAX), usize::MAX);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, "ok");
    }

    #[tokio::test]
    async fn test_upload_redirects_and_stores_both_objects() {
        let store = Arc::new(MemoryStore::new());
        let response = app(store.clone())
            .oneshot(multipart_upload("form_file", "cat.jpg", JPEG))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert_eq!(store.get("cat.jpg").await.unwrap(), JPEG);
        assert!(store.get("cat.json").await.is_ok());
    }

    #[tokio::test]
    async fn test_upload_inference_failure_is_500_with_message() {
        let store = Arc::new(MemoryStore::new());
        let response = app_with(store.clone(), Err("model overloaded"))
            .oneshot(multipart_upload("form_file", "cat.jpg", JPEG))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_to_string(response.into_body())
            .await
            .contains("model overloaded"));
        // The image stays stored without a sidecar.
        assert_eq!(store.list().await.unwrap(), vec!["cat.jpg"]);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_jpeg() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(multipart_upload("form_file", "cat.png", b"\x89PNG"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_400() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(multipart_upload("other", "cat.jpg", JPEG))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_files_returns_jpeg_names() {
        let store = Arc::new(MemoryStore::new());
        store.put("cat.jpg", JPEG.to_vec(), "image/jpeg").await.unwrap();
        store.put("cat.json", b"{}".to_vec(), "application/json").await.unwrap();
        store.put("DOG.JPEG", JPEG.to_vec(), "image/jpeg").await.unwrap();

        let response = app(store)
            .oneshot(Request::get("/files").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let names: Vec<String> =
            serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
        assert_eq!(names, vec!["cat.jpg", "DOG.JPEG"]);
    }

    #[tokio::test]
    async fn test_get_file_renders_annotation() {
        let store = Arc::new(MemoryStore::new());
        let router = app(store.clone());
        let response = router
            .clone()
            .oneshot(multipart_upload("form_file", "cat.jpg", JPEG))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = router
            .oneshot(Request::get("/files/cat.jpg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_to_string(response.into_body()).await;
        assert!(html.contains("<h1>Cat</h1>"));
        assert!(html.contains("A &lt;small&gt; cat."));
        assert!(html.contains("/serve-image/cat.jpg"));
    }

    #[tokio::test]
    async fn test_get_file_without_sidecar_is_metadata_not_found() {
        let store = Arc::new(MemoryStore::new());
        store.put("dog.jpg", JPEG.to_vec(), "image/jpeg").await.unwrap();

        let response = app(store)
            .oneshot(Request::get("/files/dog.jpg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_to_string(response.into_body()).await, "Metadata not found");
    }

    #[tokio::test]
    async fn test_serve_image_fetches_from_store() {
        let store = Arc::new(MemoryStore::new());
        store
            .put("album/cat.jpg", JPEG.to_vec(), "image/jpeg")
            .await
            .unwrap();

        let response = app(store)
            .oneshot(
                Request::get("/serve-image/album/cat.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(body_bytes(response.into_body()).await, JPEG);
    }

    #[tokio::test]
    async fn test_serve_missing_image_is_404() {
        let response = app(Arc::new(MemoryStore::new()))
            .oneshot(Request::get("/serve-image/ghost.jpg").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_index_lists_thumbnails() {
        let store = Arc::new(MemoryStore::new());
        store.put("cat.jpg", JPEG.to_vec(), "image/jpeg").await.unwrap();
        store.put("notes.txt", b"hi".to_vec(), "text/plain").await.unwrap();

        let response = app(store)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_to_string(response.into_body()).await;
        assert!(html.contains(r#"href="/files/cat.jpg""#));
        assert!(!html.contains("notes.txt"));
    }
}
