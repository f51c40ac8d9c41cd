//! Bearer-token authentication for every non-preflight request.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::Error;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Check the `Authorization` header against the configured gateway key.
///
/// With no key configured every token is rejected.
pub fn authorize(headers: &HeaderMap, api_key: Option<&str>) -> Result<(), Error> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .ok_or_else(|| Error::Unauthorized("missing Bearer token".to_string()))?;

    match api_key {
        Some(expected) if !expected.is_empty() && token == expected => Ok(()),
        _ => Err(Error::Unauthorized("invalid API key".to_string())),
    }
}

/// Middleware: answer preflight requests, reject unauthenticated ones.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }

    if let Err(e) = authorize(request.headers(), state.config.auth.api_key.as_deref()) {
        tracing::debug!("Rejected {} {}: {}", request.method(), request.uri().path(), e);
        return e.into_response();
    }

    next.run(request).await
}
