//! Shopping cart domain types.

use serde::{Deserialize, Serialize};

use minimart_core::{ProductId, UserId};

/// A line in a shopping cart.
///
/// Quantity is always positive: a line whose quantity would drop to zero
/// is removed from the cart, never stored as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A user's shopping cart.
///
/// One cart per user, created lazily on first access. At most one line
/// per product ID; adding an existing product accumulates its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart for a user.
    #[must_use]
    pub const fn empty(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
        }
    }
}
