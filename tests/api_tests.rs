// File: tests/api_tests.rs
//
// End-to-end tests of the order endpoints through the full router,
// backed by the in-memory store.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use shop_backend::api_gateway::{app, AppState};
use shop_backend::common::model::{Product, User, Voucher};
use shop_backend::order_service::OrderService;
use tower::ServiceExt;
use uuid::Uuid;

const CARD: &str = "Thanh toán bằng thẻ";

struct TestApp {
    router: Router,
    service: Arc<OrderService>,
}

impl TestApp {
    fn new() -> Self {
        let service = Arc::new(OrderService::new());
        let state = Arc::new(AppState::new(service.clone()));
        Self {
            router: app(state, tracing::Level::DEBUG),
            service,
        }
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_order(&self, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, "/api/v1/orders", Some(body)).await
    }
}

fn order_body(user: Uuid, vouchers: &[Uuid], payment_method: &str) -> Value {
    json!({
        "user": user,
        "products": [{ "product": Uuid::new_v4(), "quantity": 2 }],
        "vouchers": vouchers,
        "paymentMethod": payment_method,
    })
}

#[tokio::test]
async fn test_get_all_empty_is_404() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/v1/orders", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Không có dữ liệu");
}

#[tokio::test]
async fn test_create_with_card_payment_scenario() {
    let app = TestApp::new();
    let user = app
        .service
        .add_user(User::new("u1".to_string(), "u1@example.com".to_string()))
        .await
        .unwrap();
    let voucher = app
        .service
        .add_voucher(Voucher::new("v1".to_string(), dec!(10000), 5))
        .await
        .unwrap();

    let (status, body) = app.create_order(order_body(user.id, &[voucher.id], CARD)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Tạo đơn hàng thành công");
    assert_eq!(body["order"]["status"], "Chờ thanh toán");
    assert_eq!(body["orderId"], body["order"]["id"]);

    let order_id: Uuid = serde_json::from_value(body["orderId"].clone()).unwrap();

    let voucher = app.service.get_voucher(voucher.id).await.unwrap().unwrap();
    assert_eq!(voucher.limit, 4);

    let user = app.service.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(user.order, vec![order_id]);
}

#[tokio::test]
async fn test_create_other_payment_is_processing() {
    let app = TestApp::new();

    let (status, body) = app
        .create_order(order_body(Uuid::new_v4(), &[], "Thanh toán khi nhận hàng"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["status"], "Đang xử lý");
}

#[tokio::test]
async fn test_create_ignores_client_status() {
    let app = TestApp::new();
    let mut body = order_body(Uuid::new_v4(), &[], "COD");
    body["status"] = json!("Đã giao hàng");

    let (status, body) = app.create_order(body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["order"]["status"], "Đang xử lý");
}

#[tokio::test]
async fn test_create_missing_fields_lists_every_violation() {
    let app = TestApp::new();

    let (status, body) = app.create_order(json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = body["message"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0], "\"user\" is required");

    let (status, body) = app
        .create_order(json!({
            "user": Uuid::new_v4(),
            "products": [{ "product": "nope", "quantity": 0 }],
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"].as_array().unwrap().len(), 4);

    // Nothing was written
    assert!(app.service.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_type_errors_are_listed_with_missing_fields() {
    let app = TestApp::new();

    let (status, body) = app.create_order(json!({ "products": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!([
            "\"user\" is required",
            "\"products\" must be an array",
            "\"vouchers\" is required",
            "\"paymentMethod\" is required",
        ])
    );

    let (status, body) = app
        .create_order(json!({
            "user": 42,
            "products": [{ "product": "p", "quantity": 1.5 }],
        }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        json!([
            "\"user\" must be a string",
            "\"products[0].product\" must be a valid GUID",
            "\"products[0].quantity\" must be an integer",
            "\"vouchers\" is required",
            "\"paymentMethod\" is required",
        ])
    );

    assert!(app.service.list_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_type_errors_are_listed() {
    let app = TestApp::new();
    let (_, created) = app.create_order(order_body(Uuid::new_v4(), &[], "COD")).await;
    let uri = format!("/api/v1/orders/{}", created["orderId"].as_str().unwrap());

    let mut body = order_body(Uuid::new_v4(), &[], "COD");
    body["vouchers"] = json!({});
    body["status"] = json!(3);

    let (status, response) = app.send(Method::PUT, &uri, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let messages = response["message"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0], "\"vouchers\" must be an array");
    assert!(messages[1].as_str().unwrap().starts_with("\"status\" must be one of ["));
}

#[tokio::test]
async fn test_create_malformed_json_is_400() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/orders")
        .header("content-type", "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_with_missing_voucher_succeeds() {
    let app = TestApp::new();
    let voucher = app
        .service
        .add_voucher(Voucher::new("REAL".to_string(), dec!(5000), 3))
        .await
        .unwrap();

    let (status, _) = app
        .create_order(order_body(Uuid::new_v4(), &[Uuid::new_v4(), voucher.id], "COD"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let voucher = app.service.get_voucher(voucher.id).await.unwrap().unwrap();
    assert_eq!(voucher.limit, 2);
}

#[tokio::test]
async fn test_get_all_lists_orders() {
    let app = TestApp::new();
    app.create_order(order_body(Uuid::new_v4(), &[], "COD")).await;
    app.create_order(order_body(Uuid::new_v4(), &[], CARD)).await;

    let (status, body) = app.send(Method::GET, "/api/v1/orders", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Thông tin các đơn hàng");
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_one_expands_vouchers() {
    let app = TestApp::new();
    let voucher = app
        .service
        .add_voucher(Voucher::new("GIAM10".to_string(), dec!(10000), 10))
        .await
        .unwrap();

    let (_, created) = app.create_order(order_body(Uuid::new_v4(), &[voucher.id], "COD")).await;
    let id = created["orderId"].as_str().unwrap();

    let (status, body) = app.send(Method::GET, &format!("/api/v1/orders/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Thông tin đơn hàng");
    assert_eq!(body["data"]["vouchers"][0]["code"], "GIAM10");
    assert_eq!(body["data"]["vouchers"][0]["limit"], 9);
}

#[tokio::test]
async fn test_get_one_missing_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, &format!("/api/v1/orders/{}", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Không có thông tin");
}

#[tokio::test]
async fn test_malformed_id_is_400() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/v1/orders/not-an-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"][0], "\"id\" must be a valid GUID");

    let (status, body) = app.send(Method::GET, "/api/v1/users/42/orders", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"][0], "\"userId\" must be a valid GUID");
}

#[tokio::test]
async fn test_edit_updates_status() {
    let app = TestApp::new();
    let mut body = order_body(Uuid::new_v4(), &[], CARD);
    let (_, created) = app.create_order(body.clone()).await;
    let id = created["orderId"].as_str().unwrap();

    body["status"] = json!("Đang giao hàng");
    let (status, updated) = app
        .send(Method::PUT, &format!("/api/v1/orders/{}", id), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Cập nhật đơn hàng thành công");
    assert_eq!(updated["order"]["status"], "Đang giao hàng");
    assert_eq!(updated["order"]["paymentMethod"], CARD);
}

#[tokio::test]
async fn test_edit_invalid_payload_is_400() {
    let app = TestApp::new();
    let body = order_body(Uuid::new_v4(), &[], "COD");
    let (_, created) = app.create_order(body).await;
    let id = created["orderId"].as_str().unwrap();

    let (status, response) = app
        .send(Method::PUT, &format!("/api/v1/orders/{}", id), Some(json!({ "status": "lost" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    // user, products, vouchers, paymentMethod and status
    assert_eq!(response["message"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_edit_missing_order_is_404_regardless_of_payload() {
    let app = TestApp::new();
    let uri = format!("/api/v1/orders/{}", Uuid::new_v4());

    let (status, body) = app.send(Method::PUT, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Không tìm thấy đơn hàng");

    let mut valid = order_body(Uuid::new_v4(), &[], "COD");
    valid["status"] = json!("Đã hủy");
    let (status, _) = app.send(Method::PUT, &uri, Some(valid)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    let app = TestApp::new();
    let (_, created) = app.create_order(order_body(Uuid::new_v4(), &[], "COD")).await;
    let uri = format!("/api/v1/orders/{}", created["orderId"].as_str().unwrap());

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Xóa đơn hàng thành công");

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Không tìm thấy đơn hàng");
}

#[tokio::test]
async fn test_find_orders_by_user_expands_products() {
    let app = TestApp::new();
    let product = app
        .service
        .add_product(Product::new("Áo thun".to_string(), dec!(150000)))
        .await
        .unwrap();
    let user_id = Uuid::new_v4();

    app.create_order(json!({
        "user": user_id,
        "products": [{ "product": product.id, "quantity": 3 }],
        "vouchers": [],
        "paymentMethod": "COD",
    }))
    .await;
    app.create_order(order_body(Uuid::new_v4(), &[], "COD")).await;

    let (status, body) = app
        .send(Method::GET, &format!("/api/v1/users/{}/orders", user_id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["products"][0]["product"]["name"], "Áo thun");
    assert_eq!(orders[0]["products"][0]["quantity"], 3);
}

#[tokio::test]
async fn test_find_orders_for_user_without_orders_is_404() {
    let app = TestApp::new();

    let (status, body) = app
        .send(Method::GET, &format!("/api/v1/users/{}/orders", Uuid::new_v4()), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Người dùng không có đơn hàng");
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = TestApp::new();

    let (status, body) = app.send(Method::GET, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = app.send(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/api/v1/orders").is_some());
}
