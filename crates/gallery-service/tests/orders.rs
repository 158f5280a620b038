//! Order placement and listing integration tests.

mod common;

use axum::http::StatusCode;
use common::TestHarness;
use serde_json::{json, Value};

async fn painting_status(harness: &TestHarness, id: i64) -> String {
    let body: Value = harness
        .server
        .get(&format!("/api/paintings/{id}"))
        .await
        .json();
    body["status"].as_str().unwrap_or_default().to_string()
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn place_order_sells_every_painting() {
    let harness = TestHarness::new().await;
    let p1 = harness.create_painting_id("Sunrise").await;
    let p2 = harness.create_painting_id("Sunset").await;

    let response = harness
        .server
        .post("/api/orders")
        .json(&json!({ "user_id": harness.user_id(), "painting_ids": [p1, p2] }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Order placed successfully");
    let order_id = body["order_id"].as_i64().unwrap();

    assert_eq!(painting_status(&harness, p1).await, "sold");
    assert_eq!(painting_status(&harness, p2).await, "sold");

    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["order_id"], order_id);
    let titles: Vec<&str> = orders[0]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["title"].as_str())
        .collect();
    assert_eq!(titles, vec!["Sunrise", "Sunset"]);
}

#[tokio::test]
async fn concrete_checkout_scenario() {
    let harness = TestHarness::new().await;
    let response = harness
        .server
        .post("/api/paintings")
        .json(&json!({
            "title": "Sunset",
            "artist": "A",
            "price": 100,
            "image_url": "x.jpg",
            "status": "available"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let painting: Value = response.json();
    let painting_id = painting["painting_id"].as_i64().unwrap();

    let order_id = harness.place_order(&[painting_id]).await;

    assert_eq!(painting_status(&harness, painting_id).await, "sold");

    let orders: Vec<Value> = harness
        .server
        .get(&format!("/api/orders/{}", harness.user_id()))
        .await
        .json();
    let order = orders
        .iter()
        .find(|o| o["order_id"] == order_id)
        .expect("order is listed");
    assert_eq!(order["status"], "processing");
    assert_eq!(order["items"][0]["title"], "Sunset");
    assert_eq!(order["items"][0]["price"], "100");
    assert_eq!(order["items"][0]["status"], "sold");
}

#[tokio::test]
async fn empty_checkout_creates_order_without_items() {
    let harness = TestHarness::new().await;

    let order_id = harness.place_order(&[]).await;

    let orders: Vec<Value> = harness
        .server
        .get(&format!("/api/orders/{}", harness.user_id()))
        .await
        .json();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["order_id"], order_id);
    assert_eq!(orders[0]["items"], json!([]));
}

#[tokio::test]
async fn sold_painting_conflicts_and_rolls_back() {
    let harness = TestHarness::new().await;
    let available = harness.create_painting_id("Available").await;
    let sold = harness.create_painting_id("Sold").await;
    harness.place_order(&[sold]).await;

    let response = harness
        .server
        .post("/api/orders")
        .json(&json!({ "user_id": harness.user_id(), "painting_ids": [available, sold] }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["code"], "painting_unavailable");
    assert_eq!(body["details"]["painting_id"], sold);

    assert_eq!(painting_status(&harness, available).await, "available");
    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();
    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn unknown_painting_is_not_found_and_rolls_back() {
    let harness = TestHarness::new().await;
    let real = harness.create_painting_id("Real").await;

    let response = harness
        .server
        .post("/api/orders")
        .json(&json!({ "user_id": harness.user_id(), "painting_ids": [real, 9999] }))
        .await;

    response.assert_status_not_found();
    assert_eq!(painting_status(&harness, real).await, "available");
    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn unknown_user_is_internal_error() {
    let harness = TestHarness::new().await;
    let painting = harness.create_painting_id("Orphan").await;

    let response = harness
        .server
        .post("/api/orders")
        .json(&json!({ "user_id": 777, "painting_ids": [painting] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(painting_status(&harness, painting).await, "available");
}

// ============================================================================
// Listings
// ============================================================================

#[tokio::test]
async fn user_orders_are_newest_first() {
    let harness = TestHarness::new().await;
    let first = harness.place_order(&[]).await;
    let second = harness.place_order(&[]).await;

    let orders: Vec<Value> = harness
        .server
        .get(&format!("/api/orders/{}", harness.user_id()))
        .await
        .json();

    let ids: Vec<i64> = orders.iter().filter_map(|o| o["order_id"].as_i64()).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn user_orders_exclude_other_customers() {
    let harness = TestHarness::new().await;
    let other = harness.add_user("Alan Turing", "alan@example.com").await;
    harness.place_order(&[]).await;

    let orders: Vec<Value> = harness
        .server
        .get(&format!("/api/orders/{}", other.user_id))
        .await
        .json();

    assert!(orders.is_empty());
}

#[tokio::test]
async fn admin_listing_includes_customer() {
    let harness = TestHarness::new().await;
    let painting = harness.create_painting_id("Portrait").await;
    harness.place_order(&[painting]).await;

    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();

    assert_eq!(orders[0]["customer_name"], "Ada Lovelace");
    assert_eq!(orders[0]["email"], "ada@example.com");
    assert_eq!(orders[0]["items"][0]["quantity"], 1);
    assert_eq!(
        orders[0]["items"][0]["image_url"],
        "https://img.test/Portrait.jpg"
    );
}

#[tokio::test]
async fn nested_listing_groups_paintings_under_orders() {
    let harness = TestHarness::new().await;
    let p1 = harness.create_painting_id("One").await;
    let p2 = harness.create_painting_id("Two").await;
    let full = harness.place_order(&[p1, p2]).await;
    let empty = harness.place_order(&[]).await;

    let response = harness.server.get("/api/admin/orders").await;

    response.assert_status_ok();
    let orders: Vec<Value> = response.json();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["order_id"], empty);
    assert_eq!(orders[0]["order_items"], json!([]));
    assert_eq!(orders[1]["order_id"], full);
    assert_eq!(
        orders[1]["order_items"],
        json!([
            { "painting": { "title": "One", "image_url": "https://img.test/One.jpg" } },
            { "painting": { "title": "Two", "image_url": "https://img.test/Two.jpg" } }
        ])
    );
}

// ============================================================================
// Admin order entry
// ============================================================================

#[tokio::test]
async fn admin_create_order_keeps_painting_available() {
    let harness = TestHarness::new().await;
    let painting = harness.create_painting_id("Print").await;

    let response = harness
        .server
        .post("/api/admin/orders")
        .json(&json!({
            "user_id": harness.user_id(),
            "painting_id": painting,
            "quantity": 3,
            "status": "Shipped"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["message"], "Order created");

    assert_eq!(painting_status(&harness, painting).await, "available");
    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();
    assert_eq!(orders[0]["order_id"], body["order_id"]);
    assert_eq!(orders[0]["status"], "shipped");
    assert_eq!(orders[0]["items"][0]["quantity"], 3);
}

#[tokio::test]
async fn admin_create_order_rejects_zero_quantity() {
    let harness = TestHarness::new().await;
    let painting = harness.create_painting_id("Print").await;

    let response = harness
        .server
        .post("/api/admin/orders")
        .json(&json!({
            "user_id": harness.user_id(),
            "painting_id": painting,
            "quantity": 0
        }))
        .await;

    response.assert_status_bad_request();
    let orders: Vec<Value> = harness.server.get("/api/orders").await.json();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn order_form_lists_users_and_paintings() {
    let harness = TestHarness::new().await;
    harness.add_user("Alan Turing", "alan@example.com").await;
    let painting = harness.create_painting_id("Choice").await;

    let response = harness.server.get("/api/admin/order-form").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["users"][0]["full_name"], "Ada Lovelace");
    assert!(body["users"][0].get("email").is_none());
    assert_eq!(
        body["paintings"],
        json!([{ "painting_id": painting, "title": "Choice" }])
    );
}
