//! Normalises string values in JSON request bodies.

use crate::http::error::ApiError;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Largest body the middleware will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Trims every string in `value` recursively; strings left empty become
/// `null`.
pub fn trim_strings(value: &mut Value) {
    match value {
        Value::String(text) => {
            *value = match text.trim() {
                "" => Value::Null,
                trimmed => Value::String(trimmed.to_owned()),
            };
        }
        Value::Array(items) => items.iter_mut().for_each(trim_strings),
        Value::Object(fields) => fields.values_mut().for_each(trim_strings),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Rewrites JSON bodies of POST, PUT and PATCH requests through
/// [`trim_strings`]. Bodies that are not JSON pass through unchanged.
pub async fn trim_request_strings(request: Request, next: Next) -> Response {
    if !matches!(*request.method(), Method::POST | Method::PUT | Method::PATCH) {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(err) => return ApiError::MalformedBody(err.to_string()).into_response(),
    };

    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(mut value) => {
            trim_strings(&mut value);
            parts.headers.remove(header::CONTENT_LENGTH);
            match serde_json::to_vec(&value) {
                Ok(rewritten) => Body::from(rewritten),
                Err(_) => Body::from(bytes),
            }
        }
        Err(_) => Body::from(bytes),
    };

    next.run(Request::from_parts(parts, body)).await
}
