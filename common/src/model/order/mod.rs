//! Order models and related types

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Price;
use crate::model::product::Product;
use crate::model::voucher::Voucher;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Payment method that requires the customer to pay before the order is processed
pub const CARD_PAYMENT: &str = "Thanh toán bằng thẻ";

/// Order status
///
/// Serialized as the human-readable label shown to customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub enum OrderStatus {
    /// Order accepted and being prepared
    #[serde(rename = "Đang xử lý")]
    Processing,
    /// Waiting for a card payment to clear
    #[serde(rename = "Chờ thanh toán")]
    AwaitingPayment,
    /// Handed over to the carrier
    #[serde(rename = "Đang giao hàng")]
    Shipping,
    /// Received by the customer
    #[serde(rename = "Đã giao hàng")]
    Delivered,
    /// Cancelled by the customer or the shop
    #[serde(rename = "Đã hủy")]
    Cancelled,
}

impl OrderStatus {
    /// Every status, in the order they are listed to clients
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Processing,
        OrderStatus::AwaitingPayment,
        OrderStatus::Shipping,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "Đang xử lý",
            OrderStatus::AwaitingPayment => "Chờ thanh toán",
            OrderStatus::Shipping => "Đang giao hàng",
            OrderStatus::Delivered => "Đã giao hàng",
            OrderStatus::Cancelled => "Đã hủy",
        }
    }

    /// Status a freshly created order starts in
    pub fn initial_for(payment_method: &str) -> Self {
        if payment_method == CARD_PAYMENT {
            OrderStatus::AwaitingPayment
        } else {
            OrderStatus::Processing
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown order status: {}", s))
    }
}

/// A product line inside an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct OrderItem {
    /// Product ID
    pub product: Uuid,
    /// Number of units ordered
    pub quantity: u32,
}

/// Order model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID
    pub id: Uuid,
    /// Owning user ID
    pub user: Uuid,
    /// Ordered products
    pub products: Vec<OrderItem>,
    /// Vouchers redeemed by this order
    pub vouchers: Vec<Uuid>,
    /// Payment method label
    pub payment_method: String,
    /// Current status
    pub status: OrderStatus,
    /// Delivery address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    /// Total price as computed by the storefront
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// A validated order that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub user: Uuid,
    pub products: Vec<OrderItem>,
    pub vouchers: Vec<Uuid>,
    pub payment_method: String,
    pub shipping_address: Option<String>,
    pub total_price: Option<Price>,
}

impl Order {
    /// Build an order from a validated request, deriving its initial status
    pub fn new(new_order: NewOrder) -> Self {
        let now = Utc::now();
        let status = OrderStatus::initial_for(&new_order.payment_method);
        Self {
            id: Uuid::new_v4(),
            user: new_order.user,
            products: new_order.products,
            vouchers: new_order.vouchers,
            payment_method: new_order.payment_method,
            status,
            shipping_address: new_order.shipping_address,
            total_price: new_order.total_price,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the status. No transition rules apply.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Distinct product IDs referenced by this order
    pub fn product_ids(&self) -> Vec<Uuid> {
        let mut ids: Vec<Uuid> = self.products.iter().map(|item| item.product).collect();
        ids.sort();
        ids.dedup();
        ids
    }
}

/// An order with its voucher references expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub id: Uuid,
    pub user: Uuid,
    pub products: Vec<OrderItem>,
    /// Vouchers that still exist; dangling references are dropped
    pub vouchers: Vec<Voucher>,
    pub payment_method: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderDetail {
    /// Expand voucher references using the given lookup result
    pub fn expand(order: Order, vouchers: &[Voucher]) -> Self {
        let vouchers = order
            .vouchers
            .iter()
            .filter_map(|id| vouchers.iter().find(|v| v.id == *id).cloned())
            .collect();

        Self {
            id: order.id,
            user: order.user,
            products: order.products,
            vouchers,
            payment_method: order.payment_method,
            status: order.status,
            shipping_address: order.shipping_address,
            total_price: order.total_price,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

/// A product line with its product reference expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct OrderItemDetail {
    /// Product record, `null` when the product no longer exists
    pub product: Option<Product>,
    pub quantity: u32,
}

/// An order with its product references expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OrderWithProducts {
    pub id: Uuid,
    pub user: Uuid,
    pub products: Vec<OrderItemDetail>,
    pub vouchers: Vec<Uuid>,
    pub payment_method: String,
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Price>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderWithProducts {
    /// Expand product references using the given lookup result
    pub fn expand(order: Order, products: &[Product]) -> Self {
        let items = order
            .products
            .into_iter()
            .map(|item| OrderItemDetail {
                product: products.iter().find(|p| p.id == item.product).cloned(),
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: order.id,
            user: order.user,
            products: items,
            vouchers: order.vouchers,
            payment_method: order.payment_method,
            status: order.status,
            shipping_address: order.shipping_address,
            total_price: order.total_price,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
