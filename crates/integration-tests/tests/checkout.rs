//! Integration tests for the cart-to-order checkout transaction.
//!
//! Exercises `POST /orders/{userId}` end to end: stock decrement, order
//! creation, cart clearing, and the no-side-effects guarantee on failure.

use axum::http::StatusCode;
use serde_json::json;

use minimart_integration_tests::{delete, demo_address, get, post_json, put_json, test_app};

// =============================================================================
// Success Path
// =============================================================================

#[tokio::test]
async fn test_checkout_creates_order_decrements_stock_and_clears_cart() {
    let app = test_app();

    // Demo state: u1's cart holds {p1: 2}, p1 costs 129.99 with stock 50.
    let (status, order) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["userId"], "u1");
    assert_eq!(order["status"], "pending");
    assert_eq!(order["totalAmount"], 259.98);
    assert_eq!(order["items"][0]["productId"], "p1");
    assert_eq!(order["items"][0]["name"], "Mechanical Keyboard");
    assert_eq!(order["items"][0]["price"], 129.99);
    assert_eq!(order["items"][0]["quantity"], 2);
    assert_eq!(order["shippingAddress"]["zipCode"], "12345");

    // Stock reduced from 50 to 48.
    let (_, product) = get(&app, "/products/p1").await;
    assert_eq!(product["stock"], 48);

    // Cart emptied (but not deleted).
    let (_, cart) = get(&app, "/cart/u1").await;
    assert_eq!(cart["items"], json!([]));

    // Order retrievable by its assigned ID (demo order o1 already exists).
    let order_id = order["id"].as_str().expect("order has an id");
    assert_eq!(order_id, "o2");
    let (status, fetched) = get(&app, &format!("/orders/u1/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, order);
}

#[tokio::test]
async fn test_checkout_totals_multiple_products_exactly() {
    let app = test_app();
    post_json(&app, "/cart/u1", json!({ "productId": "p2", "quantity": 3 })).await;
    post_json(&app, "/cart/u1", json!({ "productId": "p3", "quantity": 1 })).await;

    let (status, order) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    // 2*129.99 + 3*49.99 + 1*79.99
    assert_eq!(order["totalAmount"], 489.94);
    assert_eq!(order["items"].as_array().map(Vec::len), Some(3));
}

// =============================================================================
// Failure Paths (no side effects)
// =============================================================================

#[tokio::test]
async fn test_checkout_empty_cart_fails_without_side_effects() {
    let app = test_app();

    // u2 has no cart at all.
    let (status, body) = post_json(
        &app,
        "/orders/u2",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cart is empty");

    let (_, product) = get(&app, "/products/p1").await;
    assert_eq!(product["stock"], 50);
    let (_, orders) = get(&app, "/orders/u2").await;
    assert_eq!(orders, json!([]));
}

#[tokio::test]
async fn test_checkout_insufficient_stock_fails_atomically() {
    let app = test_app();

    // p3 has stock 30; the p1 line alone would succeed.
    post_json(&app, "/cart/u1", json!({ "productId": "p3", "quantity": 31 })).await;

    let (status, body) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not enough stock for Monitor Stand");

    // No stock changed, not even for the valid line.
    let (_, p1) = get(&app, "/products/p1").await;
    assert_eq!(p1["stock"], 50);
    let (_, p3) = get(&app, "/products/p3").await;
    assert_eq!(p3["stock"], 30);

    // No order created beyond the demo order; cart untouched.
    let (_, orders) = get(&app, "/orders/u1").await;
    assert_eq!(orders.as_array().map(Vec::len), Some(1));
    let (_, cart) = get(&app, "/cart/u1").await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_checkout_single_item_exceeding_stock() {
    let app = test_app();
    let (status, _) = put_json(&app, "/cart/u1", json!({ "productId": "p1", "quantity": 51 })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Not enough stock for Mechanical Keyboard");

    let (_, product) = get(&app, "/products/p1").await;
    assert_eq!(product["stock"], 50);
}

#[tokio::test]
async fn test_checkout_malformed_body_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(&app, "/orders/u1", json!({ "shipping": "nope" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");

    // Nothing happened.
    let (_, cart) = get(&app, "/cart/u1").await;
    assert_eq!(cart["items"].as_array().map(Vec::len), Some(1));
}

// =============================================================================
// Skip Policy & Idempotence
// =============================================================================

#[tokio::test]
async fn test_checkout_skips_deleted_products() {
    let app = test_app();

    // Put p2 in the cart, then delete it from the catalog.
    post_json(&app, "/cart/u1", json!({ "productId": "p2", "quantity": 4 })).await;
    let (status, _) = delete(&app, "/products/p2").await;
    assert_eq!(status, StatusCode::OK);

    let (status, order) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    // The stale line is silently dropped; only p1 is ordered.
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["items"].as_array().map(Vec::len), Some(1));
    assert_eq!(order["items"][0]["productId"], "p1");
    assert_eq!(order["totalAmount"], 259.98);
}

#[tokio::test]
async fn test_checkout_is_not_idempotent() {
    let app = test_app();
    let body = json!({ "shippingAddress": demo_address() });

    let (_, first) = post_json(&app, "/orders/u1", body.clone()).await;

    // Repopulate the cart identically and check out again.
    post_json(&app, "/cart/u1", json!({ "productId": "p1", "quantity": 2 })).await;
    let (_, second) = post_json(&app, "/orders/u1", body).await;

    assert_ne!(first["id"], second["id"]);

    // Stock decremented twice: 50 -> 48 -> 46.
    let (_, product) = get(&app, "/products/p1").await;
    assert_eq!(product["stock"], 46);
}

#[tokio::test]
async fn test_orders_listed_in_insertion_order() {
    let app = test_app();
    let body = json!({ "shippingAddress": demo_address() });

    post_json(&app, "/orders/u1", body.clone()).await;
    post_json(&app, "/cart/u1", json!({ "productId": "p2", "quantity": 1 })).await;
    post_json(&app, "/orders/u1", body).await;

    let (status, orders) = get(&app, "/orders/u1").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = orders
        .as_array()
        .expect("orders is an array")
        .iter()
        .filter_map(|o| o["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["o1", "o2", "o3"]);
}

#[tokio::test]
async fn test_order_access_is_scoped_to_its_owner() {
    let app = test_app();

    let (status, body) = get(&app, "/orders/u2/o1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");

    let (status, body) = get(&app, "/orders/u1/o99").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Order not found");
}

#[tokio::test]
async fn test_past_orders_survive_catalog_edits() {
    let app = test_app();
    let (_, order) = post_json(
        &app,
        "/orders/u1",
        json!({ "shippingAddress": demo_address() }),
    )
    .await;

    delete(&app, "/products/p1").await;

    let order_id = order["id"].as_str().expect("order has an id");
    let (status, fetched) = get(&app, &format!("/orders/u1/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["items"][0]["name"], "Mechanical Keyboard");
    assert_eq!(fetched["items"][0]["price"], 129.99);
}
