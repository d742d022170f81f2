//! Shopping cart store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use minimart_core::{ProductId, UserId};

use crate::models::{Cart, CartItem};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The user has no cart yet.
    #[error("Cart not found")]
    CartNotFound,

    /// The cart exists but holds no line for the product.
    #[error("Product not in cart")]
    ItemNotFound,
}

/// In-memory cart store: one cart per user, created lazily.
#[derive(Debug, Default)]
pub struct CartStore {
    state: RwLock<HashMap<UserId, Vec<CartItem>>>,
}

impl CartStore {
    /// Create an empty cart store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cart store seeded with the demo cart.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let mut carts = HashMap::new();
        carts.insert(
            UserId::new("u1"),
            vec![CartItem {
                product_id: ProductId::new("p1"),
                quantity: 2,
            }],
        );
        Self {
            state: RwLock::new(carts),
        }
    }

    /// Return the user's cart, creating an empty one if none exists.
    ///
    /// Idempotent and infallible.
    pub fn get_or_create(&self, user_id: &UserId) -> Cart {
        let mut state = self.write();
        let items = state.entry(user_id.clone()).or_default();
        Cart {
            user_id: user_id.clone(),
            items: items.clone(),
        }
    }

    /// Snapshot of the user's cart items.
    ///
    /// Returns an owned copy so checkout iteration can never observe a
    /// concurrent mutation mid-loop. Empty if the user has no cart.
    #[must_use]
    pub fn items(&self, user_id: &UserId) -> Vec<CartItem> {
        self.read().get(user_id).cloned().unwrap_or_default()
    }

    /// Add `quantity` of a product to the user's cart.
    ///
    /// Accumulates into an existing line for the same product; creates the
    /// cart if the user has none. Callers must validate `quantity > 0`.
    pub fn add_item(&self, user_id: &UserId, product_id: ProductId, quantity: u32) -> Cart {
        let mut state = self.write();
        let items = state.entry(user_id.clone()).or_default();

        match items.iter_mut().find(|i| i.product_id == product_id) {
            Some(item) => item.quantity += quantity,
            None => items.push(CartItem {
                product_id,
                quantity,
            }),
        }
        Cart {
            user_id: user_id.clone(),
            items: items.clone(),
        }
    }

    /// Set the quantity of an existing cart line.
    ///
    /// A quantity of zero or less removes the line entirely; a cart never
    /// stores a non-positive quantity.
    ///
    /// # Errors
    ///
    /// `CartNotFound` if the user has no cart, `ItemNotFound` if no line
    /// matches the product.
    pub fn update_item(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let mut state = self.write();
        let items = state.get_mut(user_id).ok_or(CartError::CartNotFound)?;
        let position = items
            .iter()
            .position(|i| &i.product_id == product_id)
            .ok_or(CartError::ItemNotFound)?;

        if quantity <= 0 {
            items.remove(position);
        } else if let Some(item) = items.get_mut(position) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        Ok(Cart {
            user_id: user_id.clone(),
            items: items.clone(),
        })
    }

    /// Remove a product's line from the user's cart.
    ///
    /// # Errors
    ///
    /// `CartNotFound` if the user has no cart, `ItemNotFound` if no line
    /// matches the product.
    pub fn remove_item(&self, user_id: &UserId, product_id: &ProductId) -> Result<Cart, CartError> {
        let mut state = self.write();
        let items = state.get_mut(user_id).ok_or(CartError::CartNotFound)?;
        let position = items
            .iter()
            .position(|i| &i.product_id == product_id)
            .ok_or(CartError::ItemNotFound)?;

        items.remove(position);
        Ok(Cart {
            user_id: user_id.clone(),
            items: items.clone(),
        })
    }

    /// Empty the user's cart.
    ///
    /// The cart itself survives (emptied, not deleted). No-op if the user
    /// has no cart.
    pub fn clear(&self, user_id: &UserId) {
        if let Some(items) = self.write().get_mut(user_id) {
            items.clear();
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, Vec<CartItem>>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, Vec<CartItem>>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
