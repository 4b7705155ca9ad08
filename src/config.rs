//! Runtime configuration read from the environment.

use crate::dashboard::DEFAULT_ACTIVITY_LIMIT;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Environment variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_POOL_SIZE";
/// Environment variable holding the recent-activity limit.
pub const ACTIVITY_LIMIT_VAR: &str = "TASKBOARD_ACTIVITY_LIMIT";

const DEFAULT_POOL_SIZE: u32 = 5;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable holds a value that does not parse.
    #[error("invalid value '{value}' for {name}: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Raw value.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Store and dashboard settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    database_url: String,
    pool_size: u32,
    activity_limit: usize,
}

impl StoreConfig {
    /// Creates a configuration with default pool size and activity limit.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Reads the configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// setting does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// setting does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let pool_size = parse_or(&lookup, POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?;
        let activity_limit = parse_or(&lookup, ACTIVITY_LIMIT_VAR, DEFAULT_ACTIVITY_LIMIT)?;

        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: POOL_SIZE_VAR,
                value: pool_size.to_string(),
                reason: "pool size must be positive".to_owned(),
            });
        }

        Ok(Self {
            database_url,
            pool_size,
            activity_limit,
        })
    }

    /// Sets the pool size.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the recent-activity limit.
    #[must_use]
    pub const fn with_activity_limit(mut self, activity_limit: usize) -> Self {
        self.activity_limit = activity_limit;
        self
    }

    /// Returns the connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the connection pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns how many activity entries the dashboard shows.
    #[must_use]
    pub const fn activity_limit(&self) -> usize {
        self.activity_limit
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name).filter(|value| !value.trim().is_empty()) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: err.to_string(),
        }),
    }
}
