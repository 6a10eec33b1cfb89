//! Response bodies for the order endpoints
//!
//! Field names and messages are part of the public contract with the
//! storefront and must not change.

use axum::response::{IntoResponse, Response};
use axum::Json;
use common::model::{Order, OrderDetail, OrderWithProducts};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body carrying only a message
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Body for the order listing
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListResponse {
    pub message: String,
    pub data: Vec<Order>,
}

/// Body for a single order with its vouchers expanded
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    pub message: String,
    pub data: OrderDetail,
}

/// Body returned after an order was created
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: Uuid,
    pub order: Order,
}

/// Body returned after an order was updated
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub message: String,
    pub order: Order,
}

/// Body for a user's orders
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserOrdersResponse {
    pub orders: Vec<OrderWithProducts>,
}

/// Health check body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

macro_rules! json_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoResponse for $ty {
                fn into_response(self) -> Response {
                    Json(self).into_response()
                }
            }
        )*
    };
}

json_response!(
    MessageResponse,
    OrderListResponse,
    OrderDetailResponse,
    OrderCreatedResponse,
    OrderResponse,
    UserOrdersResponse,
    HealthResponse,
);
