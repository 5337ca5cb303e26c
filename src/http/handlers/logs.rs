//! Audit log endpoints.

use crate::{
    audit::{
        domain::{Log, LogId},
        ports::LogRepository,
    },
    http::{
        error::{ApiError, Resource},
        response::DataResponse,
        state::AppState,
    },
    task::ports::TaskRepository,
};
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

/// Query parameters accepted by `GET /logs`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogsQuery {
    /// Single record to fetch.
    pub id: Option<String>,
    /// Restricts the listing to one entity type.
    pub entity_type: Option<String>,
    /// Restricts the listing to one entity; needs `entity_type`.
    pub entity_id: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

/// `GET /logs`
///
/// With a non-empty `id`, returns that record as `{data: Log}`. Otherwise
/// returns the most recent records as `{data: [Log]}`, optionally narrowed
/// by `entity_type` and `entity_id`.
///
/// # Errors
///
/// Returns 400 for an undecodable query string, 404 when `id` is malformed
/// or unknown and 500 when the log store fails.
pub async fn list_logs<R, L>(
    State(state): State<AppState<R, L>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let Query(params) = query?;
    let audit = state.tasks.audit();

    if let Some(raw_id) = non_blank(params.id.as_ref()) {
        let id: LogId = raw_id
            .parse()
            .map_err(|_| ApiError::NotFound(Resource::Log))?;
        let log = audit
            .find_by_id(id)
            .await
            .map_err(|err| ApiError::from_audit(&err, "loading the log"))?
            .ok_or(ApiError::NotFound(Resource::Log))?;
        return Ok(Json(DataResponse::new(log)).into_response());
    }

    let limit = state.settings.recent_limit;
    let logs: Vec<Log> = match non_blank(params.entity_type.as_ref()) {
        Some(entity_type) => audit
            .list_by_entity(entity_type, non_blank(params.entity_id.as_ref()), limit)
            .await,
        None => audit.list_recent(limit).await,
    }
    .map_err(|err| ApiError::from_audit(&err, "listing logs"))?;

    Ok(Json(DataResponse::new(logs)).into_response())
}
