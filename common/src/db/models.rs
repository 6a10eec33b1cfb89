//! Row types for the PostgreSQL store and their conversion into domain models
//!
//! Decimals are stored as text and parsed on the way out, product lines as
//! JSONB and reference lists as `uuid[]`.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::decimal::Price;
use crate::error::{Error, ErrorExt, Result};
use crate::model::order::{Order, OrderItem, OrderStatus};
use crate::model::product::Product;
use crate::model::user::User;
use crate::model::voucher::Voucher;

/// Database model for the orders table
#[derive(Debug, Clone, FromRow)]
pub struct DbOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub products: Json<Vec<OrderItem>>,
    pub voucher_ids: Vec<Uuid>,
    pub payment_method: String,
    pub status: String,
    pub shipping_address: Option<String>,
    pub total_price: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for the vouchers table
#[derive(Debug, Clone, FromRow)]
pub struct DbVoucher {
    pub id: Uuid,
    pub code: String,
    pub discount: String,
    pub usage_limit: i64,
}

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub order_ids: Vec<Uuid>,
    pub voucher_ids: Vec<Uuid>,
}

/// Database model for the products table
#[derive(Debug, Clone, FromRow)]
pub struct DbProduct {
    pub id: Uuid,
    pub name: String,
    pub price: String,
}

fn parse_price(raw: &str, field: &str) -> Result<Price> {
    raw.parse::<Price>()
        .map_err(Error::from)
        .with_context(|| format!("Invalid {} format", field))
}

impl TryFrom<DbOrder> for Order {
    type Error = Error;

    fn try_from(row: DbOrder) -> Result<Self> {
        let status = row.status.parse::<OrderStatus>().map_err(Error::Internal)?;
        let total_price = row
            .total_price
            .as_deref()
            .map(|raw| parse_price(raw, "total price"))
            .transpose()?;

        Ok(Order {
            id: row.id,
            user: row.user_id,
            products: row.products.0,
            vouchers: row.voucher_ids,
            payment_method: row.payment_method,
            status,
            shipping_address: row.shipping_address,
            total_price,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<DbVoucher> for Voucher {
    type Error = Error;

    fn try_from(row: DbVoucher) -> Result<Self> {
        Ok(Voucher {
            id: row.id,
            code: row.code,
            discount: parse_price(&row.discount, "discount")?,
            limit: row.usage_limit,
        })
    }
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            order: row.order_ids,
            vouchers: row.voucher_ids,
        }
    }
}

impl TryFrom<DbProduct> for Product {
    type Error = Error;

    fn try_from(row: DbProduct) -> Result<Self> {
        Ok(Product {
            id: row.id,
            name: row.name,
            price: parse_price(&row.price, "price")?,
        })
    }
}
