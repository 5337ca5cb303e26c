//! In-memory repository for audit records.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::audit::{
    domain::{Log, LogId, NewLogEntry},
    ports::{LogRepository, LogRepositoryError, LogRepositoryResult},
};

/// Thread-safe, append-only in-memory log repository.
pub struct InMemoryLogRepository<C = DefaultClock> {
    logs: Arc<RwLock<Vec<Log>>>,
    clock: Arc<C>,
}

impl InMemoryLogRepository<DefaultClock> {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryLogRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryLogRepository<C> {
    fn clone(&self) -> Self {
        Self {
            logs: Arc::clone(&self.logs),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryLogRepository<C> {
    /// Creates an empty repository stamping records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            logs: Arc::new(RwLock::new(Vec::new())),
            clock,
        }
    }

    fn read(&self) -> LogRepositoryResult<RwLockReadGuard<'_, Vec<Log>>> {
        self.logs
            .read()
            .map_err(|err| LogRepositoryError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Iterates matching records newest first; the vector is kept in append order.
fn newest_first<'a>(
    logs: &'a [Log],
    predicate: impl Fn(&Log) -> bool + 'a,
) -> impl Iterator<Item = &'a Log> + 'a {
    logs.iter().rev().filter(move |log| predicate(log))
}

fn matches_entity(log: &Log, entity_type: &str, entity_id: Option<&str>) -> bool {
    log.entity_type() == entity_type && entity_id.is_none_or(|id| log.entity_id() == id)
}

#[async_trait]
impl<C> LogRepository for InMemoryLogRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: LogId) -> LogRepositoryResult<Option<Log>> {
        let logs = self.read()?;
        Ok(logs.iter().find(|log| log.id() == id).cloned())
    }

    async fn find_recent(&self, limit: usize) -> LogRepositoryResult<Vec<Log>> {
        let logs = self.read()?;
        Ok(newest_first(&logs, |_| true).take(limit).cloned().collect())
    }

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
        limit: usize,
    ) -> LogRepositoryResult<Vec<Log>> {
        let logs = self.read()?;
        Ok(
            newest_first(&logs, |log| matches_entity(log, entity_type, entity_id))
                .take(limit)
                .cloned()
                .collect(),
        )
    }

    async fn create(&self, entry: NewLogEntry) -> LogRepositoryResult<Log> {
        let log = Log::from_entry(LogId::new(), entry, self.clock.utc());
        let mut logs = self.logs.write().map_err(|err| {
            LogRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        logs.push(log.clone());
        Ok(log)
    }

    async fn count_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
    ) -> LogRepositoryResult<u64> {
        let logs = self.read()?;
        let count = logs
            .iter()
            .filter(|log| matches_entity(log, entity_type, entity_id))
            .count();
        u64::try_from(count).map_err(LogRepositoryError::persistence)
    }
}
