//! Shared doubles for task unit tests.

pub use crate::audit::tests::support::FlakyLogRepository;
use crate::task::{
    domain::{NewTask, PageRequest, Task, TaskFilter, TaskId, TaskPage, TaskPatch, TaskStatus},
    ports::{TaskRepository, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

mockall::mock! {
    pub TaskStore {}

    #[async_trait]
    impl TaskRepository for TaskStore {
        async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;
        async fn find_all(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>>;
        async fn find_paginated(
            &self,
            filter: &TaskFilter,
            page: PageRequest,
        ) -> TaskRepositoryResult<TaskPage>;
        async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task>;
        async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
        async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool>;
        async fn count_by_status(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<u64>;
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at(seconds: i64) -> Self {
        Self(
            Utc.timestamp_opt(1_700_000_000 + seconds, 0)
                .single()
                .expect("valid timestamp"),
        )
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
