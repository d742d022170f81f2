//! In-memory stores for storefront entities.
//!
//! Each store owns its mutable state behind a `std::sync::RwLock` and is
//! the only component allowed to touch that state; raw containers are
//! never handed out. All operations are synchronous (no I/O), so handlers
//! never hold a lock across an `.await`.
//!
//! # Stores
//!
//! - [`ProductCatalog`] - products with mutable stock
//! - [`CartStore`] - one cart per user, created lazily
//! - [`OrderStore`] - append-only order records
//! - [`UserStore`] - user accounts
//!
//! Entity IDs come from per-store monotonic counters, never from the
//! current collection size, so they stay unique under interleaved inserts
//! and future deletes.

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod users;

pub use carts::{CartError, CartStore};
pub use catalog::{CatalogError, ProductCatalog};
pub use orders::OrderStore;
pub use users::{NewUser, UserError, UserStore};
