//! Shared doubles for integration tests.

use async_trait::async_trait;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use task_api::audit::{
    adapters::memory::InMemoryLogRepository,
    domain::{Log, LogId, NewLogEntry},
    ports::{LogRepository, LogRepositoryError, LogRepositoryResult},
};

/// In-memory log store whose writes can be switched off mid-test.
#[derive(Clone, Default)]
pub struct FlakyLogRepository {
    inner: InMemoryLogRepository,
    fail_writes: Arc<AtomicBool>,
}

impl FlakyLogRepository {
    /// Makes every subsequent `create` fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl LogRepository for FlakyLogRepository {
    async fn find_by_id(&self, id: LogId) -> LogRepositoryResult<Option<Log>> {
        self.inner.find_by_id(id).await
    }

    async fn find_recent(&self, limit: usize) -> LogRepositoryResult<Vec<Log>> {
        self.inner.find_recent(limit).await
    }

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
        limit: usize,
    ) -> LogRepositoryResult<Vec<Log>> {
        self.inner.find_by_entity(entity_type, entity_id, limit).await
    }

    async fn create(&self, entry: NewLogEntry) -> LogRepositoryResult<Log> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LogRepositoryError::persistence(std::io::Error::other(
                "log store unavailable",
            )));
        }
        self.inner.create(entry).await
    }

    async fn count_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
    ) -> LogRepositoryResult<u64> {
        self.inner.count_by_entity(entity_type, entity_id).await
    }
}
