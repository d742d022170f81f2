//! Order route handlers.
//!
//! `create` is the HTTP face of the checkout transaction: it hands the
//! user ID and shipping address to [`CheckoutService`] and maps its
//! business-rule errors to 400 responses.
//!
//! [`CheckoutService`]: crate::services::CheckoutService

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use minimart_core::{OrderId, UserId};

use crate::error::{AppError, Result};
use crate::models::{Address, Order};
use crate::state::AppState;

use super::json_body;

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(rename = "shippingAddress")]
    pub shipping_addr: Address,
}

/// `GET /orders/{user_id}` - all orders for a user, in insertion order.
pub async fn index(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<Vec<Order>> {
    Json(state.orders().find_by_user(&UserId::new(user_id)))
}

/// `GET /orders/{user_id}/{order_id}` - a specific order.
///
/// 404 if the order does not exist; 403 if it belongs to another user.
pub async fn show(
    State(state): State<AppState>,
    Path((user_id, order_id)): Path<(String, String)>,
) -> Result<Json<Order>> {
    let order = state
        .orders()
        .find_by_id(&OrderId::new(order_id))
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    if order.user_id != UserId::new(user_id) {
        return Err(AppError::Forbidden("Access denied".to_string()));
    }
    Ok(Json(order))
}

/// `POST /orders/{user_id}` - checkout: convert the user's cart into an order.
///
/// 201 with the created order on success; 400 with "Cart is empty" or
/// "Not enough stock for <name>" on business-rule failures, which leave
/// all stores untouched.
pub async fn create(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = json_body(payload)?;
    let order = state
        .checkout()
        .checkout(&UserId::new(user_id), request.shipping_addr)?;
    Ok((StatusCode::CREATED, Json(order)))
}
