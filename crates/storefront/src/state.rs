//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::CheckoutService;
use crate::stores::{CartStore, OrderStore, ProductCatalog, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// in-memory stores and the checkout service. Handlers never reach the
/// stores' internals: all mutation goes through store methods.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<ProductCatalog>,
    carts: Arc<CartStore>,
    orders: Arc<OrderStore>,
    users: Arc<UserStore>,
    checkout: CheckoutService,
}

impl AppState {
    /// Create a new application state, seeding demo data when configured.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let (catalog, carts, orders, users) = if config.seed_demo_data {
            (
                Arc::new(ProductCatalog::with_demo_data()),
                Arc::new(CartStore::with_demo_data()),
                Arc::new(OrderStore::with_demo_data()),
                Arc::new(UserStore::with_demo_data()),
            )
        } else {
            (
                Arc::new(ProductCatalog::new()),
                Arc::new(CartStore::new()),
                Arc::new(OrderStore::new()),
                Arc::new(UserStore::new()),
            )
        };

        let checkout = CheckoutService::new(
            Arc::clone(&catalog),
            Arc::clone(&carts),
            Arc::clone(&orders),
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                carts,
                orders,
                users,
                checkout,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn orders(&self) -> &OrderStore {
        &self.inner.orders
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }
}
