//! Chat completions endpoint (OpenAI-compatible).
//!
//! The "completion" is an image: the request is resolved into a generation
//! payload, sent to the image backend, and the result comes back as Markdown.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use zimage_common::{ChatCompletionRequest, ChatCompletionResponse, ResponseMessage};

use super::not_found;
use crate::error::{Error, Result};
use crate::pipeline;
use crate::render::render_content;
use crate::state::AppState;

/// Build the chat router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/chat/completions", post(chat_completions).fallback(not_found))
}

/// POST /v1/chat/completions - generate an image from a chat request.
async fn chat_completions(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ChatCompletionResponse>> {
    let request: ChatCompletionRequest = serde_json::from_slice(&body)
        .map_err(|_| Error::InvalidRequest("Invalid JSON body".to_string()))?;

    let expected = &state.config.model.id;
    let model = request
        .model
        .as_deref()
        .filter(|m| !m.is_empty())
        .unwrap_or(expected.as_str())
        .to_string();
    if model != *expected {
        return Err(Error::ModelNotFound {
            model,
            expected: expected.clone(),
        });
    }

    let resolved =
        pipeline::resolve_request(&request, state.enhancer.as_ref(), state.seeds.as_ref()).await?;

    let payload = resolved.to_payload(&state.config.image);
    let image_url = state.generator.generate(&payload).await.map_err(|e| {
        tracing::error!("Image generation failed: {}", e);
        Error::from(e)
    })?;

    let content = render_content(&resolved, &image_url);
    let response = ChatCompletionResponse::new(
        model,
        ResponseMessage::assistant(content),
        Some("stop".to_string()),
    )
    .with_usage(0, 0);

    Ok(Json(response))
}
