//! Cart route handlers.
//!
//! One cart per user, keyed by the user ID in the path. Carts are created
//! lazily on first access and never deleted, only emptied.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;

use minimart_core::{ProductId, UserId};

use crate::error::{AppError, Result};
use crate::models::Cart;
use crate::state::AppState;

use super::json_body;

/// Add/update cart request body.
///
/// Quantity is signed because updates treat `<= 0` as "remove the line";
/// adds reject non-positive quantities outright.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Query parameters for removing a cart item.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveParams {
    pub product_id: Option<String>,
}

/// `GET /cart/{user_id}` - the user's cart, created lazily.
pub async fn show(State(state): State<AppState>, Path(user_id): Path<String>) -> Json<Cart> {
    Json(state.carts().get_or_create(&UserId::new(user_id)))
}

/// `POST /cart/{user_id}` - add an item to the cart.
///
/// Adding a product already in the cart accumulates its quantity.
pub async fn add(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<Cart>> {
    let request = json_body(payload)?;
    let quantity = u32::try_from(request.quantity)
        .ok()
        .filter(|q| *q > 0)
        .ok_or_else(|| AppError::BadRequest("Quantity must be positive".to_string()))?;

    let cart = state
        .carts()
        .add_item(&UserId::new(user_id), request.product_id, quantity);
    Ok(Json(cart))
}

/// `PUT /cart/{user_id}` - set an item's quantity.
///
/// A quantity of zero or less removes the line.
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    payload: std::result::Result<Json<CartRequest>, JsonRejection>,
) -> Result<Json<Cart>> {
    let request = json_body(payload)?;
    let cart = state.carts().update_item(
        &UserId::new(user_id),
        &request.product_id,
        request.quantity,
    )?;
    Ok(Json(cart))
}

/// `DELETE /cart/{user_id}?productId=...` - remove an item from the cart.
pub async fn remove(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<RemoveParams>,
) -> Result<Json<Cart>> {
    let product_id = params
        .product_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Product ID required".to_string()))?;

    let cart = state
        .carts()
        .remove_item(&UserId::new(user_id), &ProductId::new(product_id))?;
    Ok(Json(cart))
}
