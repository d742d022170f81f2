//! Product domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use minimart_core::ProductId;

/// A product in the catalog.
///
/// Stock is mutated only by checkout (via the catalog's decrement
/// operations) or explicit catalog edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID, assigned by the catalog.
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in the store currency. Non-negative.
    pub price: Decimal,
    pub image_url: String,
    /// Units on hand. Never goes negative.
    pub stock: u32,
}

/// Product fields supplied by clients when creating or updating a product.
///
/// The ID is never client-supplied; the catalog assigns it on insert and
/// preserves it on update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub stock: u32,
}
