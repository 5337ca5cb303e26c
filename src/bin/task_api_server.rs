//! Serves the task API over HTTP.
//!
//! Configuration comes from `task-api.toml`, `.env` and `TASK_API_*`
//! environment variables; see [`task_api::config`]. The task store and the
//! log store each get their own connection pool. `TASK_API_DATABASE__URL`
//! selects `PostgreSQL` for tasks and, unless `TASK_API_AUDIT__DATABASE_URL`
//! names another database, for audit records too. A store without a URL is
//! kept in memory and vanishes on exit.
//!
//! ```text
//! TASK_API_AUTH__API_KEY=secret task-api-server
//! ```

use diesel::{
    pg::PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use std::{net::SocketAddr, sync::Arc};
use task_api::{
    audit::{
        adapters::{memory::InMemoryLogRepository, postgres::PostgresLogRepository},
        ports::LogRepository,
        services::AuditLogger,
    },
    config::AppConfig,
    http::{AppState, router},
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::TaskRepository,
        services::TaskService,
    },
    telemetry,
};
use tokio::net::TcpListener;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    telemetry::init()?;
    let config = AppConfig::load_with_dotenv()?;

    let listener = TcpListener::bind(&config.server.bind).await?;
    tracing::info!(
        bind = %config.server.bind,
        environment = %config.server.environment,
        "task API listening"
    );

    match config.task_database_url() {
        Some(url) => {
            let pool = connection_pool(url, config.database.pool_size)?;
            tracing::info!("task store: PostgreSQL");
            with_log_store(listener, Arc::new(PostgresTaskRepository::new(pool)), &config).await
        }
        None => {
            tracing::warn!("no task database URL configured; tasks are kept in memory");
            with_log_store(listener, Arc::new(InMemoryTaskRepository::new()), &config).await
        }
    }
}

/// Builds the log store on its own pool, independent of the task store.
async fn with_log_store<R>(
    listener: TcpListener,
    tasks: Arc<R>,
    config: &AppConfig,
) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
{
    match config.log_database_url() {
        Some(url) => {
            let pool = connection_pool(url, config.log_pool_size())?;
            tracing::info!("log store: PostgreSQL");
            serve(listener, tasks, Arc::new(PostgresLogRepository::new(pool)), config).await
        }
        None => {
            tracing::warn!("no log database URL configured; audit records are kept in memory");
            serve(listener, tasks, Arc::new(InMemoryLogRepository::new()), config).await
        }
    }
}

fn connection_pool(
    url: &str,
    max_size: u32,
) -> Result<Pool<ConnectionManager<PgConnection>>, BoxError> {
    let pool = Pool::builder()
        .max_size(max_size)
        .build(ConnectionManager::<PgConnection>::new(url))?;
    Ok(pool)
}

async fn serve<R, L>(
    listener: TcpListener,
    tasks: Arc<R>,
    logs: Arc<L>,
    config: &AppConfig,
) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
    L: LogRepository + 'static,
{
    let service = TaskService::new(tasks, AuditLogger::new(logs));
    let app = router(AppState::new(service, config));

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("task API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
