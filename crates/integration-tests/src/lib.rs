//! Integration tests for Minimart.
//!
//! Drives the real storefront router in-process: each helper builds a
//! request, runs it through the router with `tower::ServiceExt::oneshot`,
//! and returns the status plus parsed JSON body. No sockets, no external
//! services.
//!
//! # Test Categories
//!
//! - `checkout` - The cart-to-order transaction, success and failure paths
//! - `cart` - Cart CRUD semantics
//! - `products` - Product CRUD semantics
//! - `users` - Registration, login, and profiles

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use minimart_storefront::config::StorefrontConfig;
use minimart_storefront::routes;
use minimart_storefront::state::AppState;

/// Build a fresh storefront router seeded with the demo data
/// (products p1-p3, user u1, u1's cart holding `{p1: 2}`, order o1).
#[must_use]
pub fn test_app() -> Router {
    let config = StorefrontConfig::default();
    let state = AppState::new(config);
    routes::routes().with_state(state)
}

/// Send a request through the router and return `(status, parsed body)`.
///
/// An empty response body parses as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("failed to build request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    };

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router never errors");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, json)
}

/// `GET` a path.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

/// `POST` a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// `PUT` a JSON body.
pub async fn put_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

/// `DELETE` a path.
pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// The demo shipping address used across checkout tests.
#[must_use]
pub fn demo_address() -> Value {
    serde_json::json!({
        "street": "123 Main St",
        "city": "Anytown",
        "state": "CA",
        "zipCode": "12345",
        "country": "USA"
    })
}
