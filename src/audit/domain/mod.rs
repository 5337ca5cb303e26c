//! Domain model for the audit trail.
//!
//! Audit records are append-only documents describing a create, update or
//! delete against some entity. They reference the entity by type and string
//! identifier only, so they outlive the entity itself.

mod ids;
mod log;

pub use ids::LogId;
pub use log::{ENTITY_TYPE_TASK, Log, LogAction, NewLogEntry};
