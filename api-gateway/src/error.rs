//! Error handling for the API gateway
//!
//! Every handler failure becomes an `ApiError`. Client errors carry their
//! contract message; server errors always carry the same generic message and
//! a request ID, while the underlying cause only goes to the log.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Message returned with every 5xx response
pub const SERVER_ERROR_MESSAGE: &str = "Đã có lỗi xảy ra";

/// Message returned when a referenced order disappeared mid-request
pub const ORDER_NOT_FOUND_MESSAGE: &str = "Không tìm thấy đơn hàng";

/// Either a single message or one message per violated rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(String),
    List(Vec<String>),
}

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error message(s)
    pub message: ErrorMessage,
    /// Request ID for tracing, present on server errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(&'static str),

    #[error("Common error: {0}")]
    Common(#[from] common::error::Error),
}

impl ApiError {
    /// Validation error with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation(vec![message.into()])
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use common::error::Error;

        let (status, message) = match self {
            ApiError::Validation(messages) => (StatusCode::BAD_REQUEST, ErrorMessage::List(messages)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, ErrorMessage::Single(message.to_string())),
            ApiError::Common(Error::OrderNotFound(_)) => (
                StatusCode::NOT_FOUND,
                ErrorMessage::Single(ORDER_NOT_FOUND_MESSAGE.to_string()),
            ),
            other => {
                // Generate a request ID for tracking errors
                let request_id = Uuid::new_v4().to_string();

                // Log the cause with the request ID; the client only gets the ID
                tracing::error!("API Error [{}]: {:?}", request_id, &other);

                let body = ErrorResponse {
                    message: ErrorMessage::Single(SERVER_ERROR_MESSAGE.to_string()),
                    request_id: Some(request_id),
                };
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        tracing::debug!("API client error {}: {:?}", status, message);

        let body = ErrorResponse {
            message,
            request_id: None,
        };
        (status, Json(body)).into_response()
    }
}
