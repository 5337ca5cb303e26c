//! Port contracts for audit record persistence.

pub mod repository;

pub use repository::{LogRepository, LogRepositoryError, LogRepositoryResult};
