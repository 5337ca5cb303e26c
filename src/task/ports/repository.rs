//! Repository port for the task store.

use crate::task::domain::{
    NewTask, PageRequest, Task, TaskFilter, TaskId, TaskPage, TaskPatch, TaskStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The store owns identifier allocation and timestamps. It knows nothing
/// about the audit trail.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task matching `filter`, newest first.
    async fn find_all(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns one page of the tasks matching `filter`, newest first, with
    /// the total number of matches.
    ///
    /// A page past the end has no items but still reports the total.
    async fn find_paginated(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage>;

    /// Inserts a new task and returns the stored row with its assigned
    /// identifier and timestamps.
    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Applies `patch` to an existing task and returns the refreshed row.
    ///
    /// Returns `None` when the task does not exist.
    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>>;

    /// Hard-deletes a task.
    ///
    /// Returns `false` when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns `true` when a task with the identifier exists.
    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Counts tasks, optionally restricted to one status.
    async fn count_by_status(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<u64>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
