use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::error::Result;

pub mod models;
pub mod transaction;

// Re-export transaction types
pub use transaction::{PgTransaction, PgTransactionManager};

/// Initialize the database connection pool
pub async fn init_db_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    info!("Connecting to PostgreSQL database with pool size: {}", max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL database");
    Ok(pool)
}

/// Run migrations on the database
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
