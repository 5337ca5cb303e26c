//! Task endpoints.

use crate::{
    audit::ports::LogRepository,
    http::{
        error::{ApiError, Resource},
        response::{DataResponse, MessageResponse, PagedResponse},
        state::AppState,
    },
    task::{
        domain::{
            DEFAULT_PER_PAGE, PageRequest, Task, TaskFilter, TaskId, TaskStatistics, TaskStatus,
            ValidationError,
        },
        ports::TaskRepository,
    },
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::Value;

/// Query parameters accepted by `GET /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Optional status filter.
    pub status: Option<String>,
    /// One-based page; switches the listing to paginated mode.
    pub page: Option<u32>,
    /// Page size; switches the listing to paginated mode.
    pub per_page: Option<u32>,
}

impl ListTasksQuery {
    /// Converts the query into a store filter.
    ///
    /// A blank status is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for a status outside the enum.
    pub fn to_filter(&self) -> Result<TaskFilter, ValidationError> {
        let Some(raw) = self
            .status
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
        else {
            return Ok(TaskFilter::all());
        };

        TaskStatus::try_from(raw)
            .map(TaskFilter::with_status)
            .map_err(|_| ValidationError::single("status", "The selected status is invalid."))
    }

    /// Page selection, when either `page` or `per_page` was supplied.
    #[must_use]
    pub fn to_page(&self) -> Option<PageRequest> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        Some(PageRequest::new(
            self.page.unwrap_or(1),
            self.per_page.unwrap_or(DEFAULT_PER_PAGE),
        ))
    }
}

/// `GET /tasks`
///
/// Returns `{data: [Task]}`, or `{data, meta}` for one page when `page` or
/// `per_page` is given.
///
/// # Errors
///
/// Returns 400 for an undecodable query string and 422 for an unknown
/// status filter.
pub async fn list_tasks<R, L>(
    State(state): State<AppState<R, L>>,
    query: Result<Query<ListTasksQuery>, QueryRejection>,
) -> Result<Response, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let Query(params) = query?;
    let filter = params.to_filter()?;
    if let Some(page) = params.to_page() {
        let found = state.tasks.list_paginated_tasks(&filter, page).await;
        return Ok(Json(PagedResponse::from_page(found)).into_response());
    }
    let tasks = state.tasks.list_tasks(&filter).await;
    Ok(Json(DataResponse::new(tasks)).into_response())
}

/// `GET /tasks/statistics`
///
/// # Errors
///
/// Returns 500 when the store fails.
pub async fn task_statistics<R, L>(
    State(state): State<AppState<R, L>>,
) -> Result<Json<DataResponse<TaskStatistics>>, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let statistics = state
        .tasks
        .task_statistics()
        .await
        .map_err(|err| ApiError::from_service(err, "counting tasks"))?;
    Ok(Json(DataResponse::new(statistics)))
}

/// `POST /tasks`
///
/// # Errors
///
/// Returns 400 for malformed JSON, 422 for invalid input and 500 when the
/// store or the audit trail fails.
pub async fn create_task<R, L>(
    State(state): State<AppState<R, L>>,
    body: Bytes,
) -> Result<(StatusCode, Json<MessageResponse<Task>>), ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let input = parse_body(&body)?;
    let task = state
        .tasks
        .create_task(&input)
        .await
        .map_err(|err| ApiError::from_service(err, "creating the task"))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::with_data("Task created successfully", task)),
    ))
}

/// `GET /tasks/{id}`
///
/// # Errors
///
/// Returns 404 when the identifier is malformed or unknown.
pub async fn show_task<R, L>(
    State(state): State<AppState<R, L>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let task = state
        .tasks
        .get_task(id)
        .await
        .map_err(|err| ApiError::from_service(err, "loading the task"))?
        .ok_or(ApiError::NotFound(Resource::Task))?;
    Ok(Json(DataResponse::new(task)))
}

/// `PUT /tasks/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown task, 400 for malformed JSON, 422 for invalid
/// input and 500 when the store or the audit trail fails.
pub async fn update_task<R, L>(
    State(state): State<AppState<R, L>>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<MessageResponse<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let input = parse_body(&body)?;
    let task = state
        .tasks
        .update_task(id, &input)
        .await
        .map_err(|err| ApiError::from_service(err, "updating the task"))?
        .ok_or(ApiError::NotFound(Resource::Task))?;

    Ok(Json(MessageResponse::with_data(
        "Task updated successfully",
        task,
    )))
}

/// `DELETE /tasks/{id}`
///
/// # Errors
///
/// Returns 404 for an unknown task and 500 when the store or the audit trail
/// fails.
pub async fn delete_task<R, L>(
    State(state): State<AppState<R, L>>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse<()>>, ApiError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let id = parse_task_id(&raw_id)?;
    let deleted = state
        .tasks
        .delete_task(id)
        .await
        .map_err(|err| ApiError::from_service(err, "deleting the task"))?;

    if !deleted {
        return Err(ApiError::NotFound(Resource::Task));
    }
    Ok(Json(MessageResponse::message("Task deleted successfully")))
}

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound(Resource::Task))
}

/// An empty body is treated as an empty object by the validator.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|err| ApiError::MalformedBody(err.to_string()))
}
