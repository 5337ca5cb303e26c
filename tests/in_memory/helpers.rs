//! Shared fixtures for in-memory integration tests.

use crate::test_helpers::FlakyLogRepository;
use rstest::fixture;
use serde_json::json;
use std::sync::Arc;
use task_api::{
    audit::{domain::ENTITY_TYPE_TASK, ports::LogRepository, services::AuditLogger},
    task::{adapters::memory::InMemoryTaskRepository, domain::Task, services::TaskService},
};

/// Service wired to in-memory stores.
pub type TestService = TaskService<InMemoryTaskRepository, FlakyLogRepository>;

/// Service plus direct handles on both stores.
pub struct Stores {
    pub service: TestService,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub logs: Arc<FlakyLogRepository>,
}

impl Stores {
    /// Number of audit records for one task.
    pub async fn logs_for(&self, task: &Task) -> u64 {
        self.logs
            .count_by_entity(ENTITY_TYPE_TASK, Some(&task.id().to_string()))
            .await
            .expect("log count succeeds")
    }

    /// Creates `count` tasks with `status`, titled by index.
    pub async fn seed(&self, count: usize, status: &str) -> Vec<Task> {
        let mut created = Vec::with_capacity(count);
        for index in 0..count {
            let task = self
                .service
                .create_task(&json!({ "title": format!("{status} #{index}"), "status": status }))
                .await
                .expect("seed task is valid");
            created.push(task);
        }
        created
    }
}

/// Provides fresh stores for each test.
#[fixture]
pub fn stores() -> Stores {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let logs = Arc::new(FlakyLogRepository::default());
    Stores {
        service: TaskService::new(Arc::clone(&tasks), AuditLogger::new(Arc::clone(&logs))),
        tasks,
        logs,
    }
}
