//! `PostgreSQL` repository implementation for the log store.

use super::{models::LogRow, schema::audit_logs};
use crate::audit::{
    domain::{Log, LogAction, LogId, NewLogEntry},
    ports::{LogRepository, LogRepositoryError, LogRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::{Clock, DefaultClock};

/// `PostgreSQL` connection pool type used by the log adapter.
pub type LogPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed log repository.
///
/// Each record is stored as a JSONB document in `audit_logs`. The table can
/// live in a different database from `tasks`; nothing here joins the two.
#[derive(Debug, Clone)]
pub struct PostgresLogRepository {
    pool: LogPgPool,
}

impl PostgresLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: LogPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> LogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> LogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(LogRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(LogRepositoryError::persistence)?
    }
}

#[async_trait]
impl LogRepository for PostgresLogRepository {
    async fn find_by_id(&self, id: LogId) -> LogRepositoryResult<Option<Log>> {
        self.run_blocking(move |connection| {
            let row = audit_logs::table
                .filter(audit_logs::id.eq(id.into_inner()))
                .select(LogRow::as_select())
                .first::<LogRow>(connection)
                .optional()
                .map_err(LogRepositoryError::persistence)?;
            Ok(row.map(row_to_log))
        })
        .await
    }

    async fn find_recent(&self, limit: usize) -> LogRepositoryResult<Vec<Log>> {
        let sql_limit = to_sql_limit(limit)?;
        self.run_blocking(move |connection| {
            let rows = audit_logs::table
                .select(LogRow::as_select())
                .order(audit_logs::created_at.desc())
                .limit(sql_limit)
                .load::<LogRow>(connection)
                .map_err(LogRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_log).collect())
        })
        .await
    }

    async fn find_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
        limit: usize,
    ) -> LogRepositoryResult<Vec<Log>> {
        let sql_limit = to_sql_limit(limit)?;
        let wanted_type = entity_type.to_owned();
        let wanted_id = entity_id.map(str::to_owned);
        self.run_blocking(move |connection| {
            let mut query = audit_logs::table
                .select(LogRow::as_select())
                .filter(audit_logs::entity_type.eq(wanted_type))
                .into_boxed();
            if let Some(id) = wanted_id {
                query = query.filter(audit_logs::entity_id.eq(id));
            }
            let rows = query
                .order(audit_logs::created_at.desc())
                .limit(sql_limit)
                .load::<LogRow>(connection)
                .map_err(LogRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_log).collect())
        })
        .await
    }

    async fn create(&self, entry: NewLogEntry) -> LogRepositoryResult<Log> {
        let log = Log::from_entry(LogId::new(), entry, DefaultClock.utc());
        let row = LogRow {
            id: log.id().into_inner(),
            entity_type: log.entity_type().to_owned(),
            entity_id: log.entity_id().to_owned(),
            action: log.action().as_str().to_owned(),
            data: log.data().clone(),
            created_at: log.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(audit_logs::table)
                .values(&row)
                .execute(connection)
                .map_err(LogRepositoryError::persistence)?;
            Ok(())
        })
        .await?;
        Ok(log)
    }

    async fn count_by_entity(
        &self,
        entity_type: &str,
        entity_id: Option<&str>,
    ) -> LogRepositoryResult<u64> {
        let wanted_type = entity_type.to_owned();
        let wanted_id = entity_id.map(str::to_owned);
        self.run_blocking(move |connection| {
            let mut query = audit_logs::table
                .filter(audit_logs::entity_type.eq(wanted_type))
                .count()
                .into_boxed();
            if let Some(id) = wanted_id {
                query = query.filter(audit_logs::entity_id.eq(id));
            }
            let count = query
                .get_result::<i64>(connection)
                .map_err(LogRepositoryError::persistence)?;
            u64::try_from(count).map_err(LogRepositoryError::persistence)
        })
        .await
    }
}

fn to_sql_limit(limit: usize) -> LogRepositoryResult<i64> {
    i64::try_from(limit).map_err(LogRepositoryError::persistence)
}

fn row_to_log(row: LogRow) -> Log {
    let LogRow {
        id,
        entity_type,
        entity_id,
        action,
        data,
        created_at,
    } = row;

    Log::from_entry(
        LogId::from_uuid(id),
        NewLogEntry {
            entity_type,
            entity_id,
            action: LogAction::from(action),
            data,
        },
        created_at,
    )
}
