//! In-memory repository for tasks.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{NewTask, PageRequest, Task, TaskFilter, TaskId, TaskPage, TaskPatch, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are allocated from a monotonically increasing counter starting
/// at 1, mirroring an auto-increment column. Timestamps come from the
/// injected clock.
pub struct InMemoryTaskRepository<C = DefaultClock> {
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
}

#[derive(Debug)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i64,
}

impl Default for InMemoryTaskState {
    fn default() -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl InMemoryTaskRepository<DefaultClock> {
    /// Creates an empty repository using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskRepository<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for InMemoryTaskRepository<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> InMemoryTaskRepository<C> {
    /// Creates an empty repository stamping rows with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
        }
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn newest_first(state: &InMemoryTaskState, filter: &TaskFilter) -> Vec<Task> {
    let mut tasks: Vec<Task> = state
        .tasks
        .values()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect();
    tasks.sort_by(|a, b| {
        b.created_at()
            .cmp(&a.created_at())
            .then_with(|| b.id().cmp(&a.id()))
    });
    tasks
}

#[async_trait]
impl<C> TaskRepository for InMemoryTaskRepository<C>
where
    C: Clock + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_all(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(newest_first(&state, filter))
    }

    async fn find_paginated(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage> {
        let state = self.read()?;
        let matching = newest_first(&state, filter);
        let total = u64::try_from(matching.len()).map_err(TaskRepositoryError::persistence)?;
        let skip = usize::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let take = usize::try_from(page.per_page()).map_err(TaskRepositoryError::persistence)?;
        Ok(TaskPage {
            items: matching.into_iter().skip(skip).take(take).collect(),
            total,
            request: page,
        })
    }

    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let id = TaskId::new(state.next_id);
        state.next_id += 1;
        let stored = Task::from_new(id, task.clone(), &*self.clock);
        state.tasks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply(patch, &*self.clock);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.tasks.contains_key(&id))
    }

    async fn count_by_status(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<u64> {
        let state = self.read()?;
        let filter = TaskFilter { status };
        let count = state.tasks.values().filter(|task| filter.matches(task)).count();
        u64::try_from(count).map_err(TaskRepositoryError::persistence)
    }
}
