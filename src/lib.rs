//! Task API: task records with an append-only audit trail.
//!
//! Clients create, list, update and delete tasks over HTTP. Every mutation
//! produces one audit record in a log store that is independent of the task
//! store, so audit history survives the tasks it describes.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for the two stores
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration of validation, persistence and auditing
//!
//! # Modules
//!
//! - [`task`]: Task records, validation and the task orchestrator
//! - [`audit`]: Audit records and the audit logger
//! - [`http`]: axum routes, middleware and error mapping
//! - [`config`]: Layered configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod audit;
pub mod config;
pub mod http;
pub mod task;
pub mod telemetry;
