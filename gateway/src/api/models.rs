//! Models endpoint (OpenAI-compatible).

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use zimage_common::ModelsResponse;

use super::not_found;
use crate::state::AppState;

/// Build the models router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/models",
        get(list_models).head(not_found).fallback(not_found),
    )
}

/// GET /v1/models - the single image model this gateway serves.
async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    let model = &state.config.model;
    Json(ModelsResponse::single(
        &model.id,
        &model.owned_by,
        chrono::Utc::now().timestamp(),
    ))
}
