//! Application services for task orchestration.

mod orchestrator;

pub use orchestrator::{TaskService, TaskServiceError, TaskServiceResult};
