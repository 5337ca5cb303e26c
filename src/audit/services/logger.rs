//! Audit logger: builds and persists audit records.

use crate::{
    audit::{
        domain::{ENTITY_TYPE_TASK, Log, LogAction, LogId, NewLogEntry},
        ports::{LogRepository, LogRepositoryError},
    },
    task::domain::{Task, TaskPatch},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;
use thiserror::Error;

/// Number of records returned by [`AuditLogger::list_recent`] callers that
/// do not ask for a specific limit.
pub const DEFAULT_RECENT_LIMIT: usize = 30;

/// Errors raised while writing or reading audit records.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The log store rejected the operation.
    #[error(transparent)]
    Repository(#[from] LogRepositoryError),
    /// An entity snapshot could not be serialized.
    #[error("failed to serialize audit snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;

/// Builds audit records and writes them to the log store.
///
/// Writes complete before the call returns and failures are handed back to
/// the caller. The arguments are owned or serialized up front, so a call can
/// be moved onto a background task without changing its contract.
pub struct AuditLogger<L>
where
    L: LogRepository,
{
    repository: Arc<L>,
}

impl<L> Clone for AuditLogger<L>
where
    L: LogRepository,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<L> AuditLogger<L>
where
    L: LogRepository,
{
    /// Creates a logger writing to `repository`.
    #[must_use]
    pub const fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Records an event, shaping `payload` according to `action`.
    ///
    /// `created` and `deleted` store the payload as the entity snapshot.
    /// `updated` stores `{old, new}` taken from the payload, each defaulting
    /// to an empty object. Any other action is stored verbatim as a generic
    /// record.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Repository`] when the log store fails. The
    /// failure is logged and never swallowed.
    pub async fn record(
        &self,
        action: &str,
        entity_type: &str,
        entity_id: &str,
        payload: Value,
    ) -> AuditResult<Log> {
        let entry = build_entry(LogAction::from(action), entity_type, entity_id, payload);
        let action_label = entry.action.to_string();

        match self.repository.create(entry).await {
            Ok(log) => {
                tracing::info!(
                    action = %action_label,
                    entity_type,
                    entity_id,
                    log_id = %log.id(),
                    "audit record written"
                );
                Ok(log)
            }
            Err(err) => {
                tracing::error!(
                    action = %action_label,
                    entity_type,
                    entity_id,
                    error = %err,
                    "failed to write audit record"
                );
                Err(err.into())
            }
        }
    }

    /// Records creation of an entity with its full snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_created(
        &self,
        entity_type: &str,
        entity_id: &str,
        snapshot: &impl Serialize,
    ) -> AuditResult<Log> {
        let payload = serde_json::to_value(snapshot)?;
        self.record("created", entity_type, entity_id, payload).await
    }

    /// Records an update with the pre-update snapshot and the applied change.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_updated(
        &self,
        entity_type: &str,
        entity_id: &str,
        old: &impl Serialize,
        new: &impl Serialize,
    ) -> AuditResult<Log> {
        let payload = json!({
            "old": serde_json::to_value(old)?,
            "new": serde_json::to_value(new)?,
        });
        self.record("updated", entity_type, entity_id, payload).await
    }

    /// Records deletion of an entity with its pre-delete snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_deleted(
        &self,
        entity_type: &str,
        entity_id: &str,
        snapshot: &impl Serialize,
    ) -> AuditResult<Log> {
        let payload = serde_json::to_value(snapshot)?;
        self.record("deleted", entity_type, entity_id, payload).await
    }

    /// Records creation of `task`.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_task_created(&self, task: &Task) -> AuditResult<Log> {
        self.log_created(ENTITY_TYPE_TASK, &task.id().to_string(), task).await
    }

    /// Records an update of `task`, whose state before the update was `old`.
    ///
    /// The `new` half of the record is the patch as applied, not the
    /// refreshed row.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_task_updated(
        &self,
        task: &Task,
        old: &Task,
        patch: &TaskPatch,
    ) -> AuditResult<Log> {
        self.log_updated(ENTITY_TYPE_TASK, &task.id().to_string(), old, patch).await
    }

    /// Records deletion of `task`, called while the task still exists.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] when serialization or the write fails.
    pub async fn log_task_deleted(&self, task: &Task) -> AuditResult<Log> {
        self.log_deleted(ENTITY_TYPE_TASK, &task.id().to_string(), task).await
    }

    /// Returns up to `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Repository`] when the log store fails.
    pub async fn list_recent(&self, limit: usize) -> AuditResult<Vec<Log>> {
        Ok(self.repository.find_recent(limit).await?)
    }

    /// Returns up to `limit` records for an entity type, optionally one
    /// entity, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Repository`] when the log store fails.
    pub async fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
        limit: usize,
    ) -> AuditResult<Vec<Log>> {
        Ok(self
            .repository
            .find_by_entity(entity_type, entity_id, limit)
            .await?)
    }

    /// Finds a single record.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Repository`] when the log store fails.
    pub async fn find_by_id(&self, id: LogId) -> AuditResult<Option<Log>> {
        Ok(self.repository.find_by_id(id).await?)
    }

    /// Counts records for an entity type, optionally one entity.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Repository`] when the log store fails.
    pub async fn count_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
    ) -> AuditResult<u64> {
        Ok(self
            .repository
            .count_by_entity(entity_type, entity_id)
            .await?)
    }
}

fn build_entry(
    action: LogAction,
    entity_type: &str,
    entity_id: &str,
    payload: Value,
) -> NewLogEntry {
    let data = match action {
        LogAction::Updated => {
            let old = payload.get("old").cloned().unwrap_or_else(|| json!({}));
            let new = payload.get("new").cloned().unwrap_or_else(|| json!({}));
            json!({ "old": old, "new": new })
        }
        LogAction::Created | LogAction::Deleted | LogAction::Other(_) => payload,
    };

    NewLogEntry {
        entity_type: entity_type.to_owned(),
        entity_id: entity_id.to_owned(),
        action,
        data,
    }
}
