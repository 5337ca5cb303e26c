//! Adapter implementations for the task store port.
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage for
//!   tests and single-process deployments
//! - [`postgres::PostgresTaskRepository`]: `PostgreSQL` persistence using
//!   Diesel

pub mod memory;
pub mod postgres;
