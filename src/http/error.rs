//! Error responses for the HTTP surface.

use crate::{
    audit::services::AuditError,
    task::{domain::ValidationError, services::TaskServiceError},
};
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON body shared by every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Short error title.
    pub error: String,
    /// Human-readable explanation.
    pub message: String,
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Field-level validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<BTreeMap<String, String>>,
    /// Seconds until the client may retry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Resource named in a not-found response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// A task.
    Task,
    /// An audit record.
    Log,
}

/// Failure outcomes returned by handlers and middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Input failed validation.
    Validation(ValidationError),
    /// The requested resource does not exist.
    NotFound(Resource),
    /// A mutating request carried no `X-API-KEY` header.
    MissingApiKey,
    /// The `X-API-KEY` header did not match the configured key.
    InvalidApiKey,
    /// The client exceeded its request budget.
    RateLimited {
        /// Seconds until the current window closes.
        retry_after: u64,
    },
    /// The request body was not valid JSON.
    MalformedBody(String),
    /// The query string could not be decoded.
    MalformedQuery(String),
    /// An unexpected failure; details are logged, not returned.
    Internal {
        /// Operation named in the client-facing message.
        operation: &'static str,
    },
}

impl ApiError {
    /// Maps a service failure, logging anything that becomes a 500.
    #[must_use]
    pub fn from_service(err: TaskServiceError, operation: &'static str) -> Self {
        match err {
            TaskServiceError::Validation(validation) => Self::Validation(validation),
            other => Self::internal(operation, &other),
        }
    }

    /// Maps an audit read failure.
    #[must_use]
    pub fn from_audit(err: &AuditError, operation: &'static str) -> Self {
        Self::internal(operation, err)
    }

    /// Logs `err` and returns a generic 500.
    #[must_use]
    pub fn internal(operation: &'static str, err: &dyn std::error::Error) -> Self {
        tracing::error!(operation, error = %err, "request failed");
        Self::Internal { operation }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingApiKey | Self::InvalidApiKey => StatusCode::UNAUTHORIZED,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::MalformedBody(_) | Self::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let (error, message, code) = match self {
            Self::Validation(_) => (
                "Validation failed".to_owned(),
                "The given data does not meet the requirements.".to_owned(),
                "VALIDATION_ERROR",
            ),
            Self::NotFound(Resource::Task) => (
                "Task not found".to_owned(),
                "The requested task does not exist.".to_owned(),
                "NOT_FOUND",
            ),
            Self::NotFound(Resource::Log) => (
                "Log not found".to_owned(),
                "The requested log does not exist.".to_owned(),
                "NOT_FOUND",
            ),
            Self::MissingApiKey => (
                "API key missing".to_owned(),
                "The X-API-KEY header is required for this operation.".to_owned(),
                "MISSING_API_KEY",
            ),
            Self::InvalidApiKey => (
                "Invalid API key".to_owned(),
                "The provided API key is not valid.".to_owned(),
                "INVALID_API_KEY",
            ),
            Self::RateLimited { .. } => (
                "Too many requests".to_owned(),
                "You have exceeded the request limit. Try again later.".to_owned(),
                "RATE_LIMIT_EXCEEDED",
            ),
            Self::MalformedBody(reason) => (
                "Malformed request body".to_owned(),
                format!("The request body is not valid JSON: {reason}"),
                "INVALID_JSON",
            ),
            Self::MalformedQuery(reason) => (
                "Malformed query string".to_owned(),
                format!("The query string could not be read: {reason}"),
                "INVALID_QUERY",
            ),
            Self::Internal { operation } => (
                "Internal server error".to_owned(),
                format!("An unexpected error occurred while {operation}."),
                "INTERNAL_ERROR",
            ),
        };

        ErrorBody {
            error,
            message,
            code,
            details: match self {
                Self::Validation(validation) => Some(validation.fields().clone()),
                _ => None,
            },
            retry_after: match self {
                Self::RateLimited { retry_after } => Some(*retry_after),
                _ => None,
            },
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::MalformedQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), Json(self.body())).into_response();
        if let Self::RateLimited { retry_after } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        }
        response
    }
}
