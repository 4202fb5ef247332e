//! Single-page-app fallback for anything the API routes don't claim.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::config;

/// Serve the SPA entry document, or a plain-text notice when the frontend
/// has not been built. Static assets are handled by `ServeDir` before this
/// fires.
pub async fn index() -> Response {
    let path = config().storage.frontend_dir.join("index.html");

    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Frontend not built yet").into_response(),
    }
}
