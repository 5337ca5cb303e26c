//! Tracing subscriber initialisation.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "TASK_API_LOG";

/// Level used when [`LOG_ENV`] is unset or unparseable.
pub const DEFAULT_LEVEL: &str = "info";

/// Installs the global formatting subscriber.
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .try_init()
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}
