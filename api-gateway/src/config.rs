//! Application configuration

use std::env;

use order_service::OrderServiceConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// Database URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// Database connection pool size
    pub db_pool_size: u32,
    /// Verbose logging
    pub debug: bool,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            db_pool_size: env::var("DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            debug: env::var("DEBUG").map(|v| v == "1").unwrap_or(false),
        }
    }

    /// Order service configuration when a database is configured
    pub fn order_service_config(&self) -> Option<OrderServiceConfig> {
        self.database_url
            .as_ref()
            .map(|url| OrderServiceConfig::new(url.clone(), self.db_pool_size, true))
    }
}
