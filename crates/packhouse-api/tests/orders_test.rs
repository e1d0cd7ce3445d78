//! Orders, health and OpenAPI integration tests.
//!
//! Run with: `cargo test -p packhouse-api --test orders_test`

mod helpers;

use helpers::setup_test_app;
use packhouse_core::models::{Order, OrderStatus};
use serde_json::Value;
use uuid::Uuid;

fn order(customer: &str, total: f64, pending: f64, status: OrderStatus) -> Order {
    Order {
        id: Uuid::new_v4(),
        customer_name: customer.to_string(),
        total_amount: total,
        pending_payments: pending,
        status,
        created_at: None,
    }
}

#[tokio::test]
async fn test_list_orders_empty() {
    let app = setup_test_app().await;

    let response = app.client().get("/orders").await;

    assert_eq!(response.status_code(), 200);
    let orders: Vec<Value> = response.json();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn test_list_orders_returns_stored_orders() {
    let app = setup_test_app().await;
    let shipped = order("Lakeside Deli", 120.5, 0.0, OrderStatus::Shipped);
    app.store.insert_order(shipped.clone()).unwrap();
    app.store
        .insert_order(order("Corner Bakery", 80.0, 30.0, OrderStatus::Pending))
        .unwrap();

    let response = app.client().get("/orders").await;

    assert_eq!(response.status_code(), 200);
    let orders: Vec<Order> = response.json();
    assert_eq!(orders.len(), 2);
    let found = orders.iter().find(|o| o.id == shipped.id).unwrap();
    assert_eq!(found.customer_name, "Lakeside Deli");
    assert_eq!(found.status, OrderStatus::Shipped);
}

#[tokio::test]
async fn test_health_reports_backends() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let data: Value = response.json();
    assert_eq!(data["status"], "ok");
    assert_eq!(data["document_store"], "memory");
    assert_eq!(data["notification_mode"], "live");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let doc: Value = response.json();
    assert!(doc["paths"]["/packers"].is_object());
    assert!(doc["paths"]["/notifications/low-stock"].is_object());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get("/health")
        .add_header("x-request-id", "abc-123")
        .await;

    assert_eq!(response.header("x-request-id"), "abc-123");
}
