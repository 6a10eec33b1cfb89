//! Order API handlers
//!
//! Handlers for order management endpoints including:
//! - List all orders
//! - Get order details
//! - Create an order
//! - Update an order's status
//! - Delete an order
//! - List orders by user

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::api::response::{
    MessageResponse, OrderCreatedResponse, OrderDetailResponse, OrderListResponse, OrderResponse,
    UserOrdersResponse,
};
use crate::error::ApiError;
use crate::validation::{parse_path_id, validate_order, validate_order_update, OrderPayload};
use crate::AppState;

const ORDERS_LISTED: &str = "Thông tin các đơn hàng";
const NO_ORDERS: &str = "Không có dữ liệu";
const ORDER_FOUND: &str = "Thông tin đơn hàng";
const ORDER_MISSING: &str = "Không có thông tin";
const ORDER_CREATED: &str = "Tạo đơn hàng thành công";
const ORDER_NOT_CREATED: &str = "Tạo đơn hàng thất bại";
const ORDER_UPDATED: &str = "Cập nhật đơn hàng thành công";
const ORDER_NOT_FOUND: &str = "Không tìm thấy đơn hàng";
const ORDER_DELETED: &str = "Xóa đơn hàng thành công";
const USER_HAS_NO_ORDERS: &str = "Người dùng không có đơn hàng";

fn path_id(field: &str, raw: &str) -> Result<Uuid, ApiError> {
    parse_path_id(field, raw).map_err(ApiError::Validation)
}

/// List every order
#[utoipa::path(
    get,
    path = "/api/v1/orders",
    responses(
        (status = 200, description = "Orders retrieved successfully", body = OrderListResponse),
        (status = 404, description = "No orders exist", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn get_all(
    State(state): State<Arc<AppState>>,
) -> Result<OrderListResponse, ApiError> {
    let orders = state.order_service.list_orders().await?;

    if orders.is_empty() {
        return Err(ApiError::NotFound(NO_ORDERS));
    }

    Ok(OrderListResponse {
        message: ORDERS_LISTED.to_string(),
        data: orders,
    })
}

/// Get an order by ID with its vouchers expanded
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order retrieved successfully", body = OrderDetailResponse),
        (status = 400, description = "Malformed order ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn get_one(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<OrderDetailResponse, ApiError> {
    let id = path_id("id", &id)?;

    let order = state.order_service.get_order_detail(id).await?
        .ok_or(ApiError::NotFound(ORDER_MISSING))?;

    Ok(OrderDetailResponse {
        message: ORDER_FOUND.to_string(),
        data: order,
    })
}

/// Create an order, redeem its vouchers and link it to its user
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created successfully", body = OrderCreatedResponse),
        (status = 400, description = "Invalid order payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Order could not be created", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<(StatusCode, OrderCreatedResponse), ApiError> {
    let Json(payload) = payload?;
    let new_order = validate_order(&payload).map_err(ApiError::Validation)?;

    let order = state.order_service.place_order(new_order).await?
        .ok_or(ApiError::NotFound(ORDER_NOT_CREATED))?;

    tracing::info!("Created order {} with status {}", order.id, order.status);

    Ok((
        StatusCode::CREATED,
        OrderCreatedResponse {
            message: ORDER_CREATED.to_string(),
            order_id: order.id,
            order,
        },
    ))
}

/// Overwrite the status of an order
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Order updated successfully", body = OrderResponse),
        (status = 400, description = "Invalid order payload", body = crate::error::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<OrderPayload>, JsonRejection>,
) -> Result<OrderResponse, ApiError> {
    let id = path_id("id", &id)?;

    // Existence is checked before the payload so a missing order is always a 404
    if state.order_service.get_order(id).await?.is_none() {
        return Err(ApiError::NotFound(ORDER_NOT_FOUND));
    }

    let Json(payload) = payload?;
    let status = validate_order_update(&payload).map_err(ApiError::Validation)?;

    let order = state.order_service.update_status(id, status).await?
        .ok_or(ApiError::NotFound(ORDER_NOT_FOUND))?;

    Ok(OrderResponse {
        message: ORDER_UPDATED.to_string(),
        order,
    })
}

/// Delete an order
#[utoipa::path(
    delete,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order deleted successfully", body = MessageResponse),
        (status = 400, description = "Malformed order ID", body = crate::error::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn del(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<MessageResponse, ApiError> {
    let id = path_id("id", &id)?;

    if !state.order_service.delete_order(id).await? {
        return Err(ApiError::NotFound(ORDER_NOT_FOUND));
    }

    Ok(MessageResponse {
        message: ORDER_DELETED.to_string(),
    })
}

/// Get a user's orders with their products expanded
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/orders",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Orders retrieved successfully", body = UserOrdersResponse),
        (status = 400, description = "Malformed user ID", body = crate::error::ErrorResponse),
        (status = 404, description = "User has no orders", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "order"
)]
pub async fn find_orders_by_user_id(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<UserOrdersResponse, ApiError> {
    let user_id = path_id("userId", &user_id)?;

    let orders = state.order_service.orders_for_user(user_id).await?;

    if orders.is_empty() {
        return Err(ApiError::NotFound(USER_HAS_NO_ORDERS));
    }

    Ok(UserOrdersResponse { orders })
}
