// api-gateway/src/lib.rs
pub mod api;
pub mod error;
pub mod config;
pub mod openapi;
pub mod validation;

use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use order_service::OrderService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    health::health_check,
    order::{create, del, edit, find_orders_by_user_id, get_all, get_one},
};
use crate::openapi::ApiDoc;

/// App state shared across handlers
pub struct AppState {
    /// Order service
    pub order_service: Arc<OrderService>,
}

impl AppState {
    /// Create app state around an order service
    pub fn new(order_service: Arc<OrderService>) -> Self {
        Self { order_service }
    }
}

/// API routes, without documentation or middleware
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        // Order routes
        .route("/orders", get(get_all).post(create))
        .route("/orders/:id", get(get_one).put(edit).delete(del))
        .route("/users/:user_id/orders", get(find_orders_by_user_id))
}

/// Full application: API routes, Swagger UI, CORS, request IDs and tracing
pub fn app(state: Arc<AppState>, log_level: Level) -> Router {
    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Set up Swagger UI
    let swagger_ui = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .nest("/api/v1", api_routes())
        .with_state(state)
        .merge(swagger_ui)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(log_level))
                .on_request(DefaultOnRequest::new().level(log_level))
                .on_response(DefaultOnResponse::new().level(log_level)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
