//! Diesel row models for audit records.

use super::schema::audit_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Row shared by inserts and queries; audit records are never updated.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = audit_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LogRow {
    /// Record identifier.
    pub id: uuid::Uuid,
    /// Entity type.
    pub entity_type: String,
    /// Entity identifier.
    pub entity_id: String,
    /// Action.
    pub action: String,
    /// Payload document.
    pub data: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
