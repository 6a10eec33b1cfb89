//! Product models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Price;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct Product {
    /// Unique product ID
    pub id: Uuid,
    /// Product name
    pub name: String,
    /// Unit price
    pub price: Price,
}

impl Product {
    /// Create a new product
    pub fn new(name: String, price: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            price,
        }
    }
}
