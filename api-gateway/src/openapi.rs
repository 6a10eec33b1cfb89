//! OpenAPI document for the gateway

use utoipa::OpenApi;

use crate::api;

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::order::get_all,
        api::order::get_one,
        api::order::create,
        api::order::edit,
        api::order::del,
        api::order::find_orders_by_user_id,
    ),
    components(
        schemas(
            // Order API
            crate::validation::OrderPayload,
            crate::validation::OrderItemPayload,
            common::model::order::Order,
            common::model::order::OrderItem,
            common::model::order::OrderStatus,
            common::model::order::OrderDetail,
            common::model::order::OrderItemDetail,
            common::model::order::OrderWithProducts,
            common::model::voucher::Voucher,
            common::model::product::Product,

            // Response models
            api::response::MessageResponse,
            api::response::OrderListResponse,
            api::response::OrderDetailResponse,
            api::response::OrderCreatedResponse,
            api::response::OrderResponse,
            api::response::UserOrdersResponse,
            api::response::HealthResponse,
            crate::error::ErrorResponse,
            crate::error::ErrorMessage,
        )
    ),
    tags(
        (name = "order", description = "Order management endpoints"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Shop Order API",
        version = "1.0.0",
        description = "API for listing, placing, updating and deleting storefront orders"
    )
)]
pub struct ApiDoc;
