//! Audit record types.

use super::LogId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Entity type recorded for task events.
pub const ENTITY_TYPE_TASK: &str = "task";

/// Action an audit record describes.
///
/// Records written through the generic path keep whatever action string the
/// caller supplied in [`LogAction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogAction {
    /// The entity was created; `data` is the full snapshot.
    Created,
    /// The entity was updated; `data` is `{old, new}`.
    Updated,
    /// The entity was deleted; `data` is the pre-delete snapshot.
    Deleted,
    /// Any other action, recorded verbatim.
    Other(String),
}

impl LogAction {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Other(action) => action,
        }
    }
}

impl From<&str> for LogAction {
    fn from(value: &str) -> Self {
        match value {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for LogAction {
    fn from(value: String) -> Self {
        match value.as_str() {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            _ => Self::Other(value),
        }
    }
}

impl From<LogAction> for String {
    fn from(action: LogAction) -> Self {
        match action {
            LogAction::Other(action) => action,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for LogAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record as written by the logger, before the store assigns an
/// identifier and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    /// Kind of entity the record refers to.
    pub entity_type: String,
    /// String form of the entity identifier.
    pub entity_id: String,
    /// Recorded action.
    pub action: LogAction,
    /// Action-specific payload.
    pub data: Value,
}

/// Persisted, immutable audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    id: LogId,
    entity_type: String,
    entity_id: String,
    action: LogAction,
    data: Value,
    created_at: DateTime<Utc>,
}

impl Log {
    /// Builds a stored record from an entry and its store-assigned fields.
    #[must_use]
    pub fn from_entry(id: LogId, entry: NewLogEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            entity_type: entry.entity_type,
            entity_id: entry.entity_id,
            action: entry.action,
            data: entry.data,
            created_at,
        }
    }

    /// Returns the record identifier.
    #[must_use]
    pub const fn id(&self) -> LogId {
        self.id
    }

    /// Returns the entity type.
    #[must_use]
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Returns the entity identifier.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> &LogAction {
        &self.action
    }

    /// Returns the payload.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Returns when the record was written.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
