//! Z-Image Gateway
//!
//! Exposes an OpenAI-style chat completions API in front of an image
//! generation backend. Each chat request is resolved into an image prompt,
//! optionally enhanced by an LLM, and answered with the generated image as
//! Markdown.

pub mod api;
pub mod auth;
pub mod config;
pub mod enhance;
pub mod error;
pub mod image;
pub mod logging;
pub mod pipeline;
pub mod render;
pub mod state;
pub mod test_util;

pub use config::Config;
pub use error::Error;
pub use state::AppState;

use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::{middleware, Router};
use tower_http::set_header::SetResponseHeaderLayer;

/// Build the full application router.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/v1", api::router())
        .fallback(api::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer))
        .layer(middleware::from_fn(logging::request_logger))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type, Authorization"),
        ))
        .with_state(state)
}
