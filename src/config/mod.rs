//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`TASK_API_*` prefix, `__` as separator)
//! 2. `task-api.toml` in the working directory
//! 3. Built-in defaults
//!
//! `TASK_API_AUTH__API_KEY` maps to `auth.api_key`,
//! `TASK_API_RATE_LIMIT__MAX_REQUESTS` to `rate_limit.max_requests`, and so
//! on.

mod error;
mod sections;

pub use error::ConfigError;
pub use sections::{AuditConfig, AuthConfig, DatabaseConfig, RateLimitConfig, ServerConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TASK_API_";

/// Configuration file read from the working directory when present.
pub const CONFIG_FILE: &str = "task-api.toml";

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Authentication settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Rate limiting settings.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Audit trail settings.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Loads and validates configuration from the file and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `.env` from the working directory, then calls [`Self::load`].
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Err(err) if !err.not_found() => {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
            _ => {}
        }
        Self::load()
    }

    /// Connection URL of the task store, if persistent.
    #[must_use]
    pub fn task_database_url(&self) -> Option<&str> {
        self.database.url.as_deref()
    }

    /// Connection URL of the log store, falling back to the task store's.
    #[must_use]
    pub fn log_database_url(&self) -> Option<&str> {
        self.audit
            .database_url
            .as_deref()
            .or_else(|| self.task_database_url())
    }

    /// Pool size for the log store, falling back to `database.pool_size`.
    #[must_use]
    pub fn log_pool_size(&self) -> u32 {
        self.audit.pool_size.unwrap_or(self.database.pool_size)
    }

    /// Builds the provider chain without extracting it.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let file = Path::new(CONFIG_FILE);
        if file.exists() {
            figment = figment.merge(Toml::file(file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Checks values figment cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.api_key.trim().is_empty() {
            return Err(ConfigError::invalid("auth.api_key", "must not be empty"));
        }
        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::invalid(
                "rate_limit.max_requests",
                "must be greater than zero",
            ));
        }
        if self.rate_limit.window_secs == 0 {
            return Err(ConfigError::invalid(
                "rate_limit.window_secs",
                "must be greater than zero",
            ));
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::invalid(
                "database.pool_size",
                "must be greater than zero",
            ));
        }
        if self.audit.pool_size == Some(0) {
            return Err(ConfigError::invalid(
                "audit.pool_size",
                "must be greater than zero",
            ));
        }
        if self.audit.recent_limit == 0 {
            return Err(ConfigError::invalid(
                "audit.recent_limit",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}
