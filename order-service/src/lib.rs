//! Order service: order lifecycle plus the voucher and user side effects of placing an order

pub mod service;
pub mod repository;
pub mod config;
pub mod demo;

pub use service::OrderService;
pub use service::RepositoryType;
pub use repository::{OrderRepository, InMemoryOrderRepository, PostgresOrderRepository};
pub use config::OrderServiceConfig;
