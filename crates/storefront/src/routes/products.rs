//! Product route handlers.
//!
//! Plain single-entity CRUD over the in-memory catalog. Stock edits made
//! here are subject to the same atomicity rules checkout relies on: every
//! mutation goes through a catalog method holding the write lock.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use minimart_core::ProductId;

use super::json_body;
use crate::error::{AppError, Result};
use crate::models::{Product, ProductDraft};
use crate::state::AppState;

/// `GET /products` - list all products.
pub async fn index(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().list())
}

/// `POST /products` - create a product.
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let draft = json_body(payload)?;
    let product = state.catalog().insert(draft);
    Ok((StatusCode::CREATED, Json(product)))
}

/// `GET /products/{id}` - product detail.
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .find_by_id(&ProductId::new(id))
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

/// `PUT /products/{id}` - replace a product's fields, preserving its ID.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ProductDraft>, JsonRejection>,
) -> Result<Json<Product>> {
    let draft = json_body(payload)?;
    let product = state
        .catalog()
        .update(&ProductId::new(id), draft)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok(Json(product))
}

/// `DELETE /products/{id}` - remove a product.
///
/// Past orders keep their own snapshots and are unaffected.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    if !state.catalog().remove(&ProductId::new(id)) {
        return Err(AppError::NotFound("Product not found".to_string()));
    }
    Ok(Json(json!({ "message": "Product deleted" })))
}
