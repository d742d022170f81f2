//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use minimart_core::{OrderId, OrderStatus, ProductId, UserId};

/// A shipping address.
///
/// Opaque payload: copied verbatim from the checkout request into the
/// order, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A line in an order.
///
/// Snapshot of the product's ID, name, and unit price at order-creation
/// time, so later catalog edits never alter historical orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderItem {
    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A customer order.
///
/// Immutable once created, except for status transitions through
/// explicit order edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order ID, assigned by the order store at append time.
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    /// Exact sum of `price * quantity` over `items`.
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "shippingAddress")]
    pub shipping_addr: Address,
}

/// An order before the store has stamped its ID and creation time.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_addr: Address,
}
