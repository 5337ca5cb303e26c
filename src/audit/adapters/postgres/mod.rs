//! `PostgreSQL` adapter for the audit record collection.

mod models;
mod repository;
mod schema;

pub use repository::{LogPgPool, PostgresLogRepository};
