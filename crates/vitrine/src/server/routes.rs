//! Gallery route handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use vitrine_core::format::JPEG_MIME;

use super::error::AppError;
use super::pages;
use super::AppContext;

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "form_file";

/// Create the gallery routes.
pub fn gallery_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/files", get(list_files))
        .route("/files/*name", get(get_file))
        .route("/serve-image/*name", get(serve_image))
}

/// Upload form and thumbnail list.
async fn index(State(ctx): State<AppContext>) -> Result<Html<String>, AppError> {
    let images = ctx.gallery.list_images().await?;
    Ok(Html(pages::index_page(&images)))
}

/// Accept a multipart upload, annotate it, and go back to the index.
async fn upload(
    State(ctx): State<AppContext>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let name = field
            .file_name()
            .map(base_file_name)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

        ctx.gallery
            .upload_and_annotate(&name, bytes.to_vec())
            .await?;
        return Ok(Redirect::to("/"));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{UPLOAD_FIELD}' field in upload"
    )))
}

/// JPEG names as a JSON array.
async fn list_files(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(ctx.gallery.list_images().await?))
}

/// Image page with title and description.
async fn get_file(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let entry = ctx.gallery.render_image(&name).await?;
    Ok(Html(pages::image_page(&entry)))
}

/// Raw image bytes, fetched from the store.
async fn serve_image(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = ctx.gallery.fetch_image(&name).await?;
    Ok(([(header::CONTENT_TYPE, JPEG_MIME)], bytes))
}

/// Strip any client-side directory from an uploaded file name.
fn base_file_name(name: &str) -> String {
    name.rsplit(['/', '\\']).next().unwrap_or(name).trim().to_string()
}
