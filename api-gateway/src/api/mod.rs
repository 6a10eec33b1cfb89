//! API handlers
//!
//! This module contains the API endpoint handlers organized by resource.
//! Each handler follows a consistent pattern:
//! - Extract state and parameters using Axum extractors
//! - Validate input parameters
//! - Call the appropriate service methods
//! - Map the result to the response body for that endpoint

pub mod health;
pub mod order;
pub mod response;

pub use response::{MessageResponse, OrderCreatedResponse, OrderListResponse};
