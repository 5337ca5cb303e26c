//! HTTP surface built on axum.
//!
//! Task and log routes sit behind per-client rate limiting; mutating
//! requests additionally need the `X-API-KEY` header and have their JSON
//! string values trimmed before the handlers see them. Every response,
//! including errors raised by middleware, carries the security header set.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;

pub use error::{ApiError, ErrorBody, Resource};
pub use state::{AppState, HttpSettings};

use crate::{audit::ports::LogRepository, task::ports::TaskRepository};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use std::sync::Arc;

/// Builds the application router.
#[must_use]
pub fn router<R, L>(state: AppState<R, L>) -> Router
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let api = Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, L>).post(handlers::create_task::<R, L>),
        )
        .route("/tasks/statistics", get(handlers::task_statistics::<R, L>))
        .route(
            "/tasks/{id}",
            get(handlers::show_task::<R, L>)
                .put(handlers::update_task::<R, L>)
                .delete(handlers::delete_task::<R, L>),
        )
        .route("/logs", get(handlers::list_logs::<R, L>))
        .layer(from_fn(middleware::trim_request_strings))
        .layer(from_fn_with_state(
            Arc::clone(&state.settings),
            middleware::require_api_key,
        ))
        .layer(from_fn_with_state(
            Arc::clone(&state.limiter),
            middleware::rate_limit,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(handlers::health))
        .route("/info", get(handlers::info))
        .layer(from_fn_with_state(
            Arc::clone(&state.settings),
            middleware::security_headers,
        ))
        .with_state(state)
}
