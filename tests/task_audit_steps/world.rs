//! Shared world state for task audit trail scenarios.

use std::sync::Arc;

use crate::test_helpers::FlakyLogRepository;
use rstest::fixture;
use task_api::{
    audit::services::AuditLogger,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskService, TaskServiceError},
    },
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskService<InMemoryTaskRepository, FlakyLogRepository>;

/// Scenario world for audit trail behaviour tests.
pub struct TaskAuditWorld {
    pub service: TestTaskService,
    pub logs: Arc<FlakyLogRepository>,
    pub task: Option<Task>,
    pub last_error: Option<TaskServiceError>,
}

impl TaskAuditWorld {
    /// Creates a world with empty stores.
    #[must_use]
    pub fn new() -> Self {
        let logs = Arc::new(FlakyLogRepository::default());
        let service = TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            AuditLogger::new(Arc::clone(&logs)),
        );
        Self {
            service,
            logs,
            task: None,
            last_error: None,
        }
    }

    /// Task the scenario is working on.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for TaskAuditWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskAuditWorld {
    TaskAuditWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
