use std::path::Path;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::routes::AppState;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";
const ASSET_SAMPLE: usize = 5;

/// Local modification time of `path`, or `"N/A"` when it cannot be read
pub fn file_mtime(path: &Path) -> String {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(|modified| {
            chrono::DateTime::<chrono::Local>::from(modified)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| "N/A".to_string())
}

/// Reports what the server can see of the frontend build
pub async fn dist_info(State(state): State<AppState>) -> Json<Value> {
    let dist = state.frontend_dist.as_path();
    let index = dist.join("index.html");
    let assets = dist.join("assets");

    let mut asset_names = Vec::new();
    if let Ok(mut entries) = tokio::fs::read_dir(&assets).await {
        while let Ok(Some(entry)) = entries.next_entry().await {
            asset_names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    asset_names.sort();
    asset_names.truncate(ASSET_SAMPLE);

    Json(json!({
        "FRONTEND_DIST": dist.display().to_string(),
        "index_html_exists": index.is_file(),
        "index_html_mtime": file_mtime(&index),
        "assets_dir_exists": assets.is_dir(),
        "assets_examples": asset_names,
    }))
}

/// Serves the single-page frontend: existing files as-is, anything else as `index.html`
pub async fn serve_frontend(State(state): State<AppState>, request: Request) -> Response {
    let dist = state.frontend_dist.as_path();
    let index = dist.join("index.html");

    if !index.is_file() {
        tracing::warn!(expected = %index.display(), "Frontend build not found");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Frontend build not found",
                "expected": index.display().to_string(),
            })),
        )
            .into_response();
    }

    let service = ServeDir::new(dist).fallback(ServeFile::new(&index));
    let mut response = match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    response
}
