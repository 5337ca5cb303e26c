//! Repository port for the log store.

use crate::audit::domain::{Log, LogId, NewLogEntry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for log repository operations.
pub type LogRepositoryResult<T> = Result<T, LogRepositoryError>;

/// Audit record persistence contract.
///
/// The store is append-only: records are never updated or removed through
/// this contract.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Finds a record by identifier.
    async fn find_by_id(&self, id: LogId) -> LogRepositoryResult<Option<Log>>;

    /// Returns up to `limit` records, newest first.
    async fn find_recent(&self, limit: usize) -> LogRepositoryResult<Vec<Log>>;

    /// Returns up to `limit` records for an entity type, optionally narrowed
    /// to one entity, newest first.
    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
        limit: usize,
    ) -> LogRepositoryResult<Vec<Log>>;

    /// Appends a record and returns it with its assigned identifier and
    /// timestamp.
    async fn create(&self, entry: NewLogEntry) -> LogRepositoryResult<Log>;

    /// Counts records for an entity type, optionally narrowed to one entity.
    async fn count_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
    ) -> LogRepositoryResult<u64>;
}

/// Errors returned by log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum LogRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
