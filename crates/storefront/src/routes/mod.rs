//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                    - Liveness check
//!
//! # Products
//! GET    /products                  - List products
//! POST   /products                  - Create product
//! GET    /products/{id}             - Product detail
//! PUT    /products/{id}             - Update product
//! DELETE /products/{id}             - Delete product
//!
//! # Cart (keyed by user, one cart per user)
//! GET    /cart/{userId}             - Get cart (created lazily)
//! POST   /cart/{userId}             - Add item (accumulates quantity)
//! PUT    /cart/{userId}             - Update item quantity (<= 0 removes)
//! DELETE /cart/{userId}?productId=  - Remove item
//!
//! # Orders
//! GET    /orders/{userId}           - List user's orders
//! POST   /orders/{userId}           - Checkout: convert cart into an order
//! GET    /orders/{userId}/{orderId} - Order detail (403 for other users)
//!
//! # Users
//! POST   /users/register            - Register (409 on duplicate email)
//! POST   /users/login               - Login (issues an unchecked demo token)
//! GET    /users/{id}                - Profile (password never serialized)
//! ```
//!
//! All bodies are JSON; every error is `{"error": "<message>"}`.

pub mod cart;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Json,
    Router,
    extract::rejection::JsonRejection,
    routing::{get, post},
};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Unwrap a JSON body, mapping any deserialization failure to the uniform
/// 400 "Invalid request body" response.
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|_| AppError::BadRequest("Invalid request body".to_string()))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new().route(
        "/{user_id}",
        get(cart::show)
            .post(cart::add)
            .put(cart::update)
            .delete(cart::remove),
    )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/{user_id}", get(orders::index).post(orders::create))
        .route("/{user_id}/{order_id}", get(orders::show))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/{id}", get(users::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
}
