//! Transaction handling for database operations
//!
//! Multi-document writes (an order plus the vouchers and user it touches)
//! go through a `PgTransaction` so they commit or roll back together.

use sqlx::{PgConnection, PgPool, Postgres, Transaction as SqlxTransaction};
use tracing::debug;

use crate::error::{Error, Result};

/// A PostgreSQL transaction implementation
pub struct PgTransaction {
    tx: SqlxTransaction<'static, Postgres>,
}

impl PgTransaction {
    /// Create a new PgTransaction
    pub fn new(tx: SqlxTransaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Connection to run queries against inside this transaction
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut *self.tx
    }

    /// Commit the transaction
    pub async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(Error::Database)
    }

    /// Rollback the transaction
    pub async fn rollback(self) -> Result<()> {
        self.tx.rollback().await.map_err(Error::Database)
    }
}

/// Hands out transactions on a shared pool
#[derive(Clone)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    /// Create a new PgTransactionManager
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a new transaction
    pub async fn begin_transaction(&self) -> Result<PgTransaction> {
        debug!("Beginning database transaction");
        let tx = self.pool.begin().await.map_err(Error::Database)?;
        Ok(PgTransaction::new(tx))
    }
}
