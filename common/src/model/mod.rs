//! Domain models for the shop backend

pub mod order;
pub mod voucher;
pub mod user;
pub mod product;

pub use order::{NewOrder, Order, OrderDetail, OrderItem, OrderStatus, OrderWithProducts};
pub use product::Product;
pub use user::User;
pub use voucher::Voucher;
