use common::decimal::dec;
use common::model::order::CARD_PAYMENT;
use common::model::{NewOrder, OrderItem, OrderStatus, Product, User, Voucher};
use order_service::{OrderService, OrderServiceConfig, RepositoryType};
use tokio::test;
use uuid::Uuid;

use dotenv::dotenv;

// PostgreSQL integration tests for the order service
// These tests require a running PostgreSQL database
// Run with: cargo test --test postgres_tests -- --ignored

async fn create_test_service() -> OrderService {
    dotenv().ok();

    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run PostgreSQL tests");

    let config = OrderServiceConfig::new(database_url, 5, true);
    OrderService::with_repository(RepositoryType::Postgres(config))
        .await
        .expect("Failed to create order service with PostgreSQL repository")
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_place_order_side_effects() {
    let service = create_test_service().await;

    let user = service
        .add_user(User::new("Postgres User".to_string(), "pg@example.com".to_string()))
        .await
        .unwrap();
    let voucher = service
        .add_voucher(Voucher::new("PG5".to_string(), dec!(5000), 5))
        .await
        .unwrap();

    let order = service
        .place_order(NewOrder {
            user: user.id,
            products: vec![OrderItem { product: Uuid::new_v4(), quantity: 1 }],
            vouchers: vec![voucher.id, Uuid::new_v4()],
            payment_method: CARD_PAYMENT.to_string(),
            shipping_address: None,
            total_price: Some(dec!(45000.50)),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(order.status, OrderStatus::AwaitingPayment);
    assert_eq!(order.total_price, Some(dec!(45000.50)));

    let voucher = service.get_voucher(voucher.id).await.unwrap().unwrap();
    assert_eq!(voucher.limit, 4);

    let user = service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.order, vec![order.id]);
    assert_eq!(user.vouchers.len(), 2);
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_status_and_delete() {
    let service = create_test_service().await;

    let order = service
        .place_order(NewOrder {
            user: Uuid::new_v4(),
            products: vec![OrderItem { product: Uuid::new_v4(), quantity: 3 }],
            vouchers: vec![],
            payment_method: "COD".to_string(),
            shipping_address: Some("1 Trần Phú".to_string()),
            total_price: None,
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.status, OrderStatus::Processing);

    let updated = service
        .update_status(order.id, OrderStatus::Shipping)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Shipping);

    let stored = service.get_order(order.id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Shipping);
    assert_eq!(stored.products, order.products);

    assert!(service.delete_order(order.id).await.unwrap());
    assert!(service.get_order(order.id).await.unwrap().is_none());
}

#[test]
#[ignore = "Requires test database"]
async fn test_postgres_orders_for_user() {
    let service = create_test_service().await;

    let product = service
        .add_product(Product::new("Quần jean".to_string(), dec!(420000)))
        .await
        .unwrap();
    let user_id = Uuid::new_v4();

    service
        .place_order(NewOrder {
            user: user_id,
            products: vec![OrderItem { product: product.id, quantity: 2 }],
            vouchers: vec![],
            payment_method: "COD".to_string(),
            shipping_address: None,
            total_price: None,
        })
        .await
        .unwrap();

    let orders = service.orders_for_user(user_id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].products[0].product.as_ref().unwrap().price, dec!(420000));
}
