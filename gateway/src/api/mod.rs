//! OpenAI-compatible HTTP API.

pub mod chat;
pub mod models;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;

use crate::state::AppState;

/// Build the `/v1` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(chat::router())
        .merge(models::router())
}

/// Plain-text 404 for unknown paths and methods.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
