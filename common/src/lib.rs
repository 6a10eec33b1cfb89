//! Common types and utilities for the shop backend
//!
//! This library contains the domain models, error handling and database
//! plumbing shared by the order service and the API gateway.

pub mod error;
pub mod model;
pub mod decimal;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export database types
pub use db::transaction::{PgTransaction, PgTransactionManager};

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;
