//! User models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Shop customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct User {
    /// Unique user ID
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Orders placed by this user, oldest first
    pub order: Vec<Uuid>,
    /// Vouchers redeemed by this user, oldest first
    pub vouchers: Vec<Uuid>,
}

impl User {
    /// Create a new user with no order history
    pub fn new(name: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            order: Vec::new(),
            vouchers: Vec::new(),
        }
    }

    /// Record a placed order and the vouchers it redeemed
    pub fn record_order(&mut self, order_id: Uuid, voucher_ids: &[Uuid]) {
        self.order.push(order_id);
        self.vouchers.extend_from_slice(voucher_ids);
    }
}
