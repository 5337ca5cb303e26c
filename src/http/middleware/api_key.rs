//! API key authentication for mutating requests.

use crate::http::{error::ApiError, state::HttpSettings};
use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Returns `true` for methods that require an API key.
#[must_use]
pub fn requires_api_key(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

/// Checks `X-API-KEY` on POST, PUT, PATCH and DELETE requests.
pub async fn require_api_key(
    State(settings): State<Arc<HttpSettings>>,
    request: Request,
    next: Next,
) -> Response {
    if !requires_api_key(request.method()) {
        return next.run(request).await;
    }

    let verdict = match request.headers().get(API_KEY_HEADER) {
        None => Err(ApiError::MissingApiKey),
        Some(value) if value.is_empty() => Err(ApiError::MissingApiKey),
        Some(value) if value.as_bytes() != settings.api_key.as_bytes() => {
            Err(ApiError::InvalidApiKey)
        }
        Some(_) => Ok(()),
    };

    match verdict {
        Ok(()) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                method = %request.method(),
                uri = %request.uri(),
                code = err.body().code,
                "rejected unauthenticated request"
            );
            err.into_response()
        }
    }
}
