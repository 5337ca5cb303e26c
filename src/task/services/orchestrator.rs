//! Service layer coordinating the task store and the audit trail.

use crate::{
    audit::{
        ports::LogRepository,
        services::{AuditError, AuditLogger},
    },
    task::{
        domain::{
            PageRequest, Task, TaskFilter, TaskId, TaskPage, TaskStatistics, TaskStatus,
            ValidationError, validate_new_task, validate_task_patch,
        },
        ports::{TaskRepository, TaskRepositoryError},
    },
};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Input failed validation; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The task store failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The audit record could not be written.
    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Every successful mutation leaves exactly one audit record behind, or the
/// call fails visibly. The two stores share no transaction: a failed audit
/// write after a create leaves the task row in place, while a failed audit
/// write before a delete leaves the task untouched.
///
/// Updates read the current row and then write the patch without a lock,
/// so two concurrent updates of one task may record an `old` snapshot that
/// the other update already replaced.
pub struct TaskService<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    repository: Arc<R>,
    audit: AuditLogger<L>,
}

impl<R, L> Clone for TaskService<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            audit: self.audit.clone(),
        }
    }
}

impl<R, L> TaskService<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    /// Creates a service over the given task store and audit logger.
    #[must_use]
    pub const fn new(repository: Arc<R>, audit: AuditLogger<L>) -> Self {
        Self { repository, audit }
    }

    /// Returns the audit logger used by this service.
    #[must_use]
    pub const fn audit(&self) -> &AuditLogger<L> {
        &self.audit
    }

    /// Lists tasks matching `filter`, newest first.
    ///
    /// A failing store yields an empty list; the failure is logged.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        match self.repository.find_all(filter).await {
            Ok(tasks) => tasks,
            Err(err) => {
                tracing::warn!(
                    status = ?filter.status.map(TaskStatus::as_str),
                    error = %err,
                    "task listing failed; returning an empty list"
                );
                Vec::new()
            }
        }
    }

    /// Lists one page of tasks matching `filter`, newest first.
    ///
    /// A failing store yields an empty page with a zero total; the failure
    /// is logged.
    pub async fn list_paginated_tasks(&self, filter: &TaskFilter, page: PageRequest) -> TaskPage {
        match self.repository.find_paginated(filter, page).await {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(
                    status = ?filter.status.map(TaskStatus::as_str),
                    page = page.page(),
                    per_page = page.per_page(),
                    error = %err,
                    "paginated task listing failed; returning an empty page"
                );
                TaskPage::empty(page)
            }
        }
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the store fails.
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<Task>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Validates `input`, stores a new task and records its creation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the input is invalid,
    /// [`TaskServiceError::Repository`] when the store rejects the insert, or
    /// [`TaskServiceError::Audit`] when the audit write fails after the task
    /// was stored.
    pub async fn create_task(&self, input: &Value) -> TaskServiceResult<Task> {
        let new_task = validate_new_task(input)?;
        let task = self.repository.create(&new_task).await?;
        self.audit.log_task_created(&task).await?;
        Ok(task)
    }

    /// Applies a validated partial update and records it.
    ///
    /// Returns `Ok(None)` when the task does not exist; no validation runs
    /// and no audit record is written in that case.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] when the input is invalid,
    /// [`TaskServiceError::Repository`] when the store fails, or
    /// [`TaskServiceError::Audit`] when the audit write fails after the
    /// update was stored.
    pub async fn update_task(&self, id: TaskId, input: &Value) -> TaskServiceResult<Option<Task>> {
        let Some(old) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let patch = validate_task_patch(input)?;
        let Some(updated) = self.repository.update(id, &patch).await? else {
            return Ok(None);
        };

        self.audit.log_task_updated(&updated, &old, &patch).await?;
        Ok(Some(updated))
    }

    /// Records and then hard-deletes a task.
    ///
    /// Returns `false` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Audit`] when the audit write fails, in
    /// which case the task is not deleted, or
    /// [`TaskServiceError::Repository`] when the store fails.
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<bool> {
        let Some(task) = self.repository.find_by_id(id).await? else {
            return Ok(false);
        };

        self.audit.log_task_deleted(&task).await?;
        Ok(self.repository.delete(id).await?)
    }

    /// Counts tasks in total and per status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when any count fails.
    pub async fn task_statistics(&self) -> TaskServiceResult<TaskStatistics> {
        Ok(TaskStatistics {
            total: self.repository.count_by_status(None).await?,
            pending: self
                .repository
                .count_by_status(Some(TaskStatus::Pending))
                .await?,
            in_progress: self
                .repository
                .count_by_status(Some(TaskStatus::InProgress))
                .await?,
            completed: self
                .repository
                .count_by_status(Some(TaskStatus::Completed))
                .await?,
        })
    }
}
