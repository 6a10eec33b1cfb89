//! Configuration for the PostgreSQL order store
//!
//! The in-memory store needs no configuration, so everything here concerns
//! the database connection. Bad values are reported as
//! `Error::ConfigurationError` before any connection is attempted.

use std::env;

use common::error::{Error, Result};

/// Default number of pooled connections
pub const DEFAULT_POOL_SIZE: u32 = 5;

/// Upper bound for the pool; Postgres' default `max_connections` is 100
pub const MAX_POOL_SIZE: u32 = 100;

/// Configuration for the PostgreSQL order store
#[derive(Debug, Clone)]
pub struct OrderServiceConfig {
    /// Database URL
    pub database_url: String,
    /// Database connection pool size
    pub db_pool_size: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl OrderServiceConfig {
    /// Create a new configuration with custom values
    pub fn new(database_url: String, db_pool_size: u32, run_migrations: bool) -> Self {
        Self {
            database_url,
            db_pool_size,
            run_migrations,
        }
    }

    /// Read `DATABASE_URL`, `DB_POOL_SIZE` and `RUN_MIGRATIONS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::ConfigurationError("DATABASE_URL is not set".to_string()))?;

        let db_pool_size = match lookup("DB_POOL_SIZE") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|_| {
                Error::ConfigurationError(format!("DB_POOL_SIZE is not a number: {}", raw))
            })?,
            None => DEFAULT_POOL_SIZE,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref().map(str::trim) {
            None | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => {
                return Err(Error::ConfigurationError(format!(
                    "RUN_MIGRATIONS must be true or false, got {}",
                    other
                )))
            }
        };

        let config = Self::new(database_url, db_pool_size, run_migrations);
        config.validate()?;
        Ok(config)
    }

    /// Check the values before connecting
    pub fn validate(&self) -> Result<()> {
        let scheme_ok = self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://");
        if !scheme_ok {
            return Err(Error::ConfigurationError(
                "DATABASE_URL must start with postgres:// or postgresql://".to_string(),
            ));
        }

        if self.db_pool_size == 0 || self.db_pool_size > MAX_POOL_SIZE {
            return Err(Error::ConfigurationError(format!(
                "DB_POOL_SIZE must be between 1 and {}, got {}",
                MAX_POOL_SIZE, self.db_pool_size
            )));
        }

        Ok(())
    }
}
