//! Application services for the audit trail.

mod logger;

pub use logger::{AuditError, AuditLogger, AuditResult, DEFAULT_RECENT_LIMIT};
