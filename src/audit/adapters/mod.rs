//! Adapter implementations for the log store port.
//!
//! - [`memory::InMemoryLogRepository`]: thread-safe in-memory storage
//! - [`postgres::PostgresLogRepository`]: JSONB document collection in
//!   `PostgreSQL`, deliberately without a foreign key to `tasks`

pub mod memory;
pub mod postgres;
