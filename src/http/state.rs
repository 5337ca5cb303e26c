//! Shared handler and middleware state.

use super::middleware::RateLimiter;
use crate::{
    audit::ports::LogRepository,
    config::AppConfig,
    task::{ports::TaskRepository, services::TaskService},
};
use std::sync::Arc;

/// Settings read by middleware and handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Expected `X-API-KEY` value for mutating requests.
    pub api_key: String,
    /// Adds `Strict-Transport-Security` when set.
    pub production: bool,
    /// Records returned by `GET /logs`.
    pub recent_limit: usize,
}

impl HttpSettings {
    /// Extracts the HTTP-relevant settings from the service configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.auth.api_key.clone(),
            production: config.server.is_production(),
            recent_limit: config.audit.recent_limit,
        }
    }
}

/// Shared application dependencies.
pub struct AppState<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    /// Task orchestrator.
    pub tasks: TaskService<R, L>,
    /// Request-independent settings.
    pub settings: Arc<HttpSettings>,
    /// Per-client request counter.
    pub limiter: Arc<RateLimiter>,
}

impl<R, L> Clone for AppState<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
            settings: Arc::clone(&self.settings),
            limiter: Arc::clone(&self.limiter),
        }
    }
}

impl<R, L> AppState<R, L>
where
    R: TaskRepository,
    L: LogRepository,
{
    /// Builds state from a service and the loaded configuration.
    #[must_use]
    pub fn new(tasks: TaskService<R, L>, config: &AppConfig) -> Self {
        Self {
            tasks,
            settings: Arc::new(HttpSettings::from_config(config)),
            limiter: Arc::new(RateLimiter::from_config(&config.rate_limit)),
        }
    }
}
