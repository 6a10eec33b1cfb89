//! Order service implementation

use std::sync::Arc;

use common::error::{ErrorExt, Result};
use common::model::{
    NewOrder, Order, OrderDetail, OrderStatus, OrderWithProducts, Product, User, Voucher,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::OrderServiceConfig;
use crate::repository::{InMemoryOrderRepository, OrderRepository, PostgresOrderRepository};

/// Order service for placing and managing orders
pub struct OrderService {
    /// Repository for order data
    repo: Arc<dyn OrderRepository>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository
    InMemory,
    /// PostgreSQL repository
    Postgres(OrderServiceConfig),
}

impl OrderService {
    /// Create a new order service backed by memory
    pub fn new() -> Self {
        Self {
            repo: Arc::new(InMemoryOrderRepository::new()),
        }
    }

    /// Create a service on top of an existing repository
    pub fn with_repo(repo: Arc<dyn OrderRepository>) -> Self {
        Self { repo }
    }

    /// Create a new order service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn OrderRepository> = match repo_type {
            RepositoryType::InMemory => Arc::new(InMemoryOrderRepository::new()),
            RepositoryType::Postgres(config) => {
                Arc::new(PostgresOrderRepository::with_config(&config).await?)
            }
        };

        Ok(Self { repo })
    }

    /// Get every order
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        debug!("Listing all orders");
        self.repo.list_orders().await
            .with_context(|| "Failed to list orders")
    }

    /// Get an order by ID
    pub async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        self.repo.get_order(id).await
            .with_context(|| format!("Failed to retrieve order {}", id))
    }

    /// Get an order with its vouchers expanded
    pub async fn get_order_detail(&self, id: Uuid) -> Result<Option<OrderDetail>> {
        let Some(order) = self.get_order(id).await? else {
            return Ok(None);
        };

        let vouchers = self.repo.get_vouchers(&order.vouchers).await
            .with_context(|| format!("Failed to retrieve vouchers for order {}", id))?;

        Ok(Some(OrderDetail::expand(order, &vouchers)))
    }

    /// Place a new order.
    ///
    /// The initial status comes from the payment method. Redeemed vouchers and
    /// the user's order history are updated in the same unit of work.
    pub async fn place_order(&self, new_order: NewOrder) -> Result<Option<Order>> {
        let order = Order::new(new_order);
        info!(
            "Placing order {} for user {} with {} voucher(s), status {}",
            order.id,
            order.user,
            order.vouchers.len(),
            order.status
        );

        let order_id = order.id;
        self.repo.create_order(order).await
            .with_context(|| format!("Failed to create order {}", order_id))
    }

    /// Overwrite the status of an order
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Option<Order>> {
        let Some(mut order) = self.get_order(id).await? else {
            return Ok(None);
        };

        info!("Updating order {} status: {} -> {}", id, order.status, status);
        order.set_status(status);

        self.repo.save_order(order).await
            .with_context(|| format!("Failed to update order {}", id))
            .map(Some)
    }

    /// Delete an order. Users and vouchers referencing it are left untouched.
    pub async fn delete_order(&self, id: Uuid) -> Result<bool> {
        info!("Deleting order {}", id);
        self.repo.delete_order(id).await
            .with_context(|| format!("Failed to delete order {}", id))
    }

    /// Get a user's orders with their products expanded
    pub async fn orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderWithProducts>> {
        let orders = self.repo.find_orders_by_user(user_id).await
            .with_context(|| format!("Failed to retrieve orders for user {}", user_id))?;

        let mut product_ids: Vec<Uuid> = orders.iter().flat_map(Order::product_ids).collect();
        product_ids.sort();
        product_ids.dedup();

        let products = self.repo.get_products(&product_ids).await
            .with_context(|| format!("Failed to retrieve products for user {}", user_id))?;

        Ok(orders
            .into_iter()
            .map(|order| OrderWithProducts::expand(order, &products))
            .collect())
    }

    /// Get a voucher by ID
    pub async fn get_voucher(&self, id: Uuid) -> Result<Option<Voucher>> {
        self.repo.get_voucher(id).await
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        self.repo.get_user(id).await
    }

    /// Register a voucher
    pub async fn add_voucher(&self, voucher: Voucher) -> Result<Voucher> {
        info!("Adding voucher {} ({})", voucher.code, voucher.id);
        self.repo.save_voucher(voucher).await
    }

    /// Register a user
    pub async fn add_user(&self, user: User) -> Result<User> {
        info!("Adding user {} ({})", user.email, user.id);
        self.repo.save_user(user).await
    }

    /// Register a product
    pub async fn add_product(&self, product: Product) -> Result<Product> {
        info!("Adding product {} ({})", product.name, product.id);
        self.repo.save_product(product).await
    }
}

impl Default for OrderService {
    fn default() -> Self {
        Self::new()
    }
}
