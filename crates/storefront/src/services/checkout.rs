//! Cart-to-order checkout transaction.
//!
//! Converts a user's cart into an immutable order: resolves each cart
//! line against the catalog, validates stock, snapshots product details,
//! decrements stock, appends the order, and clears the cart.
//!
//! The operation is all-or-nothing from the caller's perspective. It runs
//! as two passes:
//!
//! 1. **Validation pass** - reads only. Every line is resolved and its
//!    stock checked before anything mutates, so a late `InsufficientStock`
//!    can never leave an earlier line partially decremented.
//! 2. **Commit pass** - stock for all lines is decremented atomically via
//!    [`ProductCatalog::decrement_all`], then the order is appended and
//!    the cart cleared.
//!
//! Cart lines whose product no longer exists in the catalog are silently
//! dropped from the order rather than failing the checkout. This is a
//! deliberate policy (carts may reference deleted products), kept explicit
//! here so tests can assert on it.

use std::sync::{Arc, Mutex, PoisonError};

use rust_decimal::Decimal;
use thiserror::Error;

use minimart_core::{OrderStatus, UserId};

use crate::models::{Address, Order, OrderDraft, OrderItem};
use crate::stores::{CartStore, CatalogError, OrderStore, ProductCatalog};

/// Errors a checkout can surface to the caller.
///
/// Both are business-rule failures with no side effects: the stores are
/// exactly as they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// The user's cart has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart line requests more units than the product has in stock.
    #[error("Not enough stock for {name}")]
    InsufficientStock { name: String },
}

/// Orchestrates [`ProductCatalog`], [`CartStore`], and [`OrderStore`] to
/// transactionally convert a cart into an order.
#[derive(Debug)]
pub struct CheckoutService {
    catalog: Arc<ProductCatalog>,
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
    /// Serializes whole checkouts: held across both passes so concurrent
    /// checkouts can never interleave their validate/commit sequences.
    gate: Mutex<()>,
}

impl CheckoutService {
    /// Create a checkout service over the given stores.
    #[must_use]
    pub const fn new(
        catalog: Arc<ProductCatalog>,
        carts: Arc<CartStore>,
        orders: Arc<OrderStore>,
    ) -> Self {
        Self {
            catalog,
            carts,
            orders,
            gate: Mutex::new(()),
        }
    }

    /// Convert the user's cart into an order shipped to `shipping_addr`.
    ///
    /// On success the product stocks are reduced, one order is appended,
    /// and the cart is emptied. On failure nothing has changed. Checkout
    /// is explicitly not idempotent: repeating it with a repopulated cart
    /// yields a new order ID and a further stock decrement.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`] if the cart has no items.
    /// - [`CheckoutError::InsufficientStock`] if any resolvable line wants
    ///   more units than are in stock.
    pub fn checkout(
        &self,
        user_id: &UserId,
        shipping_addr: Address,
    ) -> Result<Order, CheckoutError> {
        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);

        let cart_items = self.carts.items(user_id);
        if cart_items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Validation pass: resolve and check every line before any mutation.
        // Lines whose product is missing from the catalog are skipped.
        let mut order_items = Vec::new();
        let mut total_amount = Decimal::ZERO;
        for cart_item in &cart_items {
            let Some(product) = self.catalog.find_by_id(&cart_item.product_id) else {
                tracing::debug!(
                    product_id = %cart_item.product_id,
                    user_id = %user_id,
                    "skipping unresolvable cart line"
                );
                continue;
            };

            if product.stock < cart_item.quantity {
                return Err(CheckoutError::InsufficientStock { name: product.name });
            }

            let item = OrderItem {
                product_id: product.id,
                name: product.name,
                price: product.price,
                quantity: cart_item.quantity,
            };
            total_amount += item.line_total();
            order_items.push(item);
        }

        // Commit pass: decrement all validated lines atomically.
        let lines: Vec<_> = order_items
            .iter()
            .map(|item| (item.product_id.clone(), item.quantity))
            .collect();
        self.catalog.decrement_all(&lines).map_err(|err| {
            let name = match err {
                CatalogError::InsufficientStock { name } => name,
                // A product deleted between the passes reads as zero stock.
                CatalogError::NotFound(id) => order_items
                    .iter()
                    .find(|item| item.product_id == id)
                    .map_or_else(|| id.into_inner(), |item| item.name.clone()),
            };
            CheckoutError::InsufficientStock { name }
        })?;

        let order = self.orders.append(OrderDraft {
            user_id: user_id.clone(),
            items: order_items,
            total_amount,
            status: OrderStatus::Pending,
            shipping_addr,
        });
        self.carts.clear(user_id);

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total_amount = %order.total_amount,
            items = order.items.len(),
            "checkout completed"
        );
        Ok(order)
    }
}
