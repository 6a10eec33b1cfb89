//! Repository for order, voucher, user and product documents
//!
//! One trait covers every collection an order touches so that placing an
//! order can be a single unit of work.

use async_trait::async_trait;
use common::db::models::{DbOrder, DbProduct, DbUser, DbVoucher};
use common::db::{init_db_pool, run_migrations, PgTransactionManager};
use common::error::{Error, Result};
use common::model::{Order, Product, User, Voucher};
use dashmap::DashMap;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::OrderServiceConfig;

/// Order repository trait defining the interface for document storage
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Get every order
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Get an order by ID
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>>;

    /// Get all orders placed by a user
    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>>;

    /// Persist a new order together with its side effects.
    ///
    /// Every voucher referenced by the order that exists loses one
    /// redemption (once per occurrence), and the owning user gets the order
    /// ID and voucher IDs appended. Missing vouchers and a missing user are
    /// skipped. Either everything is written or nothing is.
    async fn create_order(&self, order: Order) -> Result<Option<Order>>;

    /// Overwrite an existing order
    async fn save_order(&self, order: Order) -> Result<Order>;

    /// Remove an order, returning whether it existed
    async fn delete_order(&self, id: Uuid) -> Result<bool>;

    /// Get a voucher by ID
    async fn get_voucher(&self, id: Uuid) -> Result<Option<Voucher>>;

    /// Get the vouchers that exist among the given IDs
    async fn get_vouchers(&self, ids: &[Uuid]) -> Result<Vec<Voucher>>;

    /// Create or update a voucher
    async fn save_voucher(&self, voucher: Voucher) -> Result<Voucher>;

    /// Get the products that exist among the given IDs
    async fn get_products(&self, ids: &[Uuid]) -> Result<Vec<Product>>;

    /// Create or update a product
    async fn save_product(&self, product: Product) -> Result<Product>;

    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Create or update a user
    async fn save_user(&self, user: User) -> Result<User>;
}

/// In-memory repository for order data
pub struct InMemoryOrderRepository {
    /// Orders by ID
    pub orders: DashMap<Uuid, Order>,
    /// Vouchers by ID
    pub vouchers: DashMap<Uuid, Voucher>,
    /// Users by ID
    pub users: DashMap<Uuid, User>,
    /// Products by ID
    pub products: DashMap<Uuid, Product>,
    /// Serializes order creation so its three writes are observed together
    create_lock: Mutex<()>,
}

impl InMemoryOrderRepository {
    /// Create a new in-memory order repository
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            vouchers: DashMap::new(),
            users: DashMap::new(),
            products: DashMap::new(),
            create_lock: Mutex::new(()),
        }
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.iter().map(|o| o.value().clone()).collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        Ok(self.orders.get(&id).map(|o| o.clone()))
    }

    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|entry| entry.value().user == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        orders.sort_by_key(|o| o.created_at);
        Ok(orders)
    }

    async fn create_order(&self, order: Order) -> Result<Option<Order>> {
        let _guard = self.create_lock.lock().await;

        self.orders.insert(order.id, order.clone());

        for voucher_id in &order.vouchers {
            match self.vouchers.get_mut(voucher_id) {
                Some(mut voucher) => voucher.redeem(),
                None => debug!("Voucher {} not found, skipping redemption", voucher_id),
            }
        }

        match self.users.get_mut(&order.user) {
            Some(mut user) => user.record_order(order.id, &order.vouchers),
            None => warn!("User {} not found, order {} not linked", order.user, order.id),
        }

        Ok(Some(order))
    }

    async fn save_order(&self, order: Order) -> Result<Order> {
        if !self.orders.contains_key(&order.id) {
            return Err(Error::OrderNotFound(format!("Order not found: {}", order.id)));
        }
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool> {
        Ok(self.orders.remove(&id).is_some())
    }

    async fn get_voucher(&self, id: Uuid) -> Result<Option<Voucher>> {
        Ok(self.vouchers.get(&id).map(|v| v.clone()))
    }

    async fn get_vouchers(&self, ids: &[Uuid]) -> Result<Vec<Voucher>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.vouchers.get(id).map(|v| v.clone()))
            .collect())
    }

    async fn save_voucher(&self, voucher: Voucher) -> Result<Voucher> {
        self.vouchers.insert(voucher.id, voucher.clone());
        Ok(voucher)
    }

    async fn get_products(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.products.get(id).map(|p| p.clone()))
            .collect())
    }

    async fn save_product(&self, product: Product) -> Result<Product> {
        self.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn save_user(&self, user: User) -> Result<User> {
        self.users.insert(user.id, user.clone());
        Ok(user)
    }
}

const ORDER_COLUMNS: &str = "id, user_id, products, voucher_ids, payment_method, status, \
     shipping_address, total_price, created_at, updated_at";

/// PostgreSQL repository for order data
pub struct PostgresOrderRepository {
    /// Database connection pool
    pool: PgPool,
    /// Transaction manager
    transaction_manager: PgTransactionManager,
}

impl PostgresOrderRepository {
    /// Create a repository on an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            transaction_manager: PgTransactionManager::new(pool.clone()),
            pool,
        }
    }

    /// Create a new PostgreSQL order repository with configuration
    pub async fn with_config(config: &OrderServiceConfig) -> Result<Self> {
        config.validate()?;
        let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;

        if config.run_migrations {
            run_migrations(&pool).await?;
        }

        Ok(Self::new(pool))
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        debug!("Listing orders from database");

        let rows: Vec<DbOrder> = sqlx::query_as(&format!(
            "SELECT {} FROM orders ORDER BY created_at",
            ORDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn get_order(&self, id: Uuid) -> Result<Option<Order>> {
        debug!("Getting order from database: {}", id);

        let row: Option<DbOrder> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn find_orders_by_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        debug!("Getting orders for user: {}", user_id);

        let rows: Vec<DbOrder> = sqlx::query_as(&format!(
            "SELECT {} FROM orders WHERE user_id = $1 ORDER BY created_at",
            ORDER_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn create_order(&self, order: Order) -> Result<Option<Order>> {
        debug!("Creating order in database: {}", order.id);

        let mut tx = self.transaction_manager.begin_transaction().await?;

        let inserted: Option<DbOrder> = sqlx::query_as(&format!(
            "INSERT INTO orders ({cols}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {cols}",
            cols = ORDER_COLUMNS
        ))
        .bind(order.id)
        .bind(order.user)
        .bind(Json(&order.products))
        .bind(&order.vouchers)
        .bind(&order.payment_method)
        .bind(order.status.as_str())
        .bind(&order.shipping_address)
        .bind(order.total_price.map(|p| p.to_string()))
        .bind(order.created_at)
        .bind(order.updated_at)
        .fetch_optional(tx.conn())
        .await?;

        let Some(inserted) = inserted else {
            tx.rollback().await?;
            return Ok(None);
        };

        // One decrement per occurrence; the row lock serializes concurrent orders
        for voucher_id in &order.vouchers {
            let result = sqlx::query("UPDATE vouchers SET usage_limit = usage_limit - 1 WHERE id = $1")
                .bind(voucher_id)
                .execute(tx.conn())
                .await?;

            if result.rows_affected() == 0 {
                debug!("Voucher {} not found, skipping redemption", voucher_id);
            }
        }

        let result = sqlx::query(
            "UPDATE users \
             SET order_ids = array_append(order_ids, $2), voucher_ids = voucher_ids || $3 \
             WHERE id = $1",
        )
        .bind(order.user)
        .bind(order.id)
        .bind(&order.vouchers)
        .execute(tx.conn())
        .await?;

        if result.rows_affected() == 0 {
            warn!("User {} not found, order {} not linked", order.user, order.id);
        }

        tx.commit().await?;
        info!("Order {} committed", order.id);

        Order::try_from(inserted).map(Some)
    }

    async fn save_order(&self, order: Order) -> Result<Order> {
        debug!("Updating order in database: {}", order.id);

        let result = sqlx::query(
            "UPDATE orders SET \
                user_id = $2, products = $3, voucher_ids = $4, payment_method = $5, \
                status = $6, shipping_address = $7, total_price = $8, updated_at = $9 \
             WHERE id = $1",
        )
        .bind(order.id)
        .bind(order.user)
        .bind(Json(&order.products))
        .bind(&order.vouchers)
        .bind(&order.payment_method)
        .bind(order.status.as_str())
        .bind(&order.shipping_address)
        .bind(order.total_price.map(|p| p.to_string()))
        .bind(order.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::OrderNotFound(format!("Order not found: {}", order.id)));
        }

        Ok(order)
    }

    async fn delete_order(&self, id: Uuid) -> Result<bool> {
        debug!("Deleting order from database: {}", id);

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_voucher(&self, id: Uuid) -> Result<Option<Voucher>> {
        let row: Option<DbVoucher> =
            sqlx::query_as("SELECT id, code, discount, usage_limit FROM vouchers WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Voucher::try_from).transpose()
    }

    async fn get_vouchers(&self, ids: &[Uuid]) -> Result<Vec<Voucher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<DbVoucher> =
            sqlx::query_as("SELECT id, code, discount, usage_limit FROM vouchers WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Voucher::try_from).collect()
    }

    async fn save_voucher(&self, voucher: Voucher) -> Result<Voucher> {
        sqlx::query(
            "INSERT INTO vouchers (id, code, discount, usage_limit) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO UPDATE SET code = $2, discount = $3, usage_limit = $4",
        )
        .bind(voucher.id)
        .bind(&voucher.code)
        .bind(voucher.discount.to_string())
        .bind(voucher.limit)
        .execute(&self.pool)
        .await?;

        Ok(voucher)
    }

    async fn get_products(&self, ids: &[Uuid]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<DbProduct> =
            sqlx::query_as("SELECT id, name, price FROM products WHERE id = ANY($1)")
                .bind(ids)
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn save_product(&self, product: Product) -> Result<Product> {
        sqlx::query(
            "INSERT INTO products (id, name, price) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET name = $2, price = $3",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(product.price.to_string())
        .execute(&self.pool)
        .await?;

        Ok(product)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let row: Option<DbUser> = sqlx::query_as(
            "SELECT id, name, email, order_ids, voucher_ids FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    async fn save_user(&self, user: User) -> Result<User> {
        sqlx::query(
            "INSERT INTO users (id, name, email, order_ids, voucher_ids) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET name = $2, email = $3, order_ids = $4, voucher_ids = $5",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.order)
        .bind(&user.vouchers)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }
}
