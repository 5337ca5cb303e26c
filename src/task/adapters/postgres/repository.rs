//! `PostgreSQL` repository implementation for the task store.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{
        NewTask, PageRequest, PersistedTaskData, Task, TaskFilter, TaskId, TaskPage, TaskPatch,
        TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = find_row(connection, id)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let wanted = filter.status;
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(status) = wanted {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            let rows = query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_paginated(
        &self,
        filter: &TaskFilter,
        page: PageRequest,
    ) -> TaskRepositoryResult<TaskPage> {
        let wanted = filter.status;
        let offset = i64::try_from(page.offset()).map_err(TaskRepositoryError::persistence)?;
        let limit = i64::from(page.per_page());
        // The count and the page are separate statements, so a concurrent
        // write can make `total` disagree with the rows returned.
        self.run_blocking(move |connection| {
            let mut count_query = tasks::table.count().into_boxed();
            let mut page_query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(status) = wanted {
                count_query = count_query.filter(tasks::status.eq(status.as_str()));
                page_query = page_query.filter(tasks::status.eq(status.as_str()));
            }
            let total = count_query
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let rows = page_query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .offset(offset)
                .limit(limit)
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(TaskPage {
                items: rows
                    .into_iter()
                    .map(row_to_task)
                    .collect::<TaskRepositoryResult<_>>()?,
                total: u64::try_from(total).map_err(TaskRepositoryError::persistence)?,
                request: page,
            })
        })
        .await
    }

    async fn create(&self, task: &NewTask) -> TaskRepositoryResult<Task> {
        let timestamp = DefaultClock.utc();
        let new_row = NewTaskRow {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status.as_str().to_owned(),
            created_at: timestamp,
            updated_at: timestamp,
        };

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> TaskRepositoryResult<Option<Task>> {
        // Diesel rejects a changeset with nothing to set, and an empty patch
        // must not move `updated_at` anyway.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let changeset = TaskChangeset {
            title: patch.title.clone(),
            description: patch.description.clone(),
            status: patch.status.map(|status| status.as_str().to_owned()),
            updated_at: DefaultClock.utc(),
        };

        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.filter(tasks::id.eq(id.value())))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.value())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }

    async fn exists(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            diesel::select(diesel::dsl::exists(
                tasks::table.filter(tasks::id.eq(id.value())),
            ))
            .get_result::<bool>(connection)
            .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn count_by_status(&self, status: Option<TaskStatus>) -> TaskRepositoryResult<u64> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table.count().into_boxed();
            if let Some(wanted) = status {
                query = query.filter(tasks::status.eq(wanted.as_str()));
            }
            let count = query
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            u64::try_from(count).map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

fn find_row(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.value()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        status: persisted_status,
        created_at,
        updated_at,
    } = row;

    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        status,
        created_at,
        updated_at,
    }))
}
