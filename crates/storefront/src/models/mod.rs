//! Domain models for the storefront.
//!
//! These types double as the JSON wire format: field names are camelCase
//! on the wire, money is `rust_decimal::Decimal` serialized as a JSON
//! number, and timestamps are RFC 3339.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{Address, Order, OrderDraft, OrderItem};
pub use product::{Product, ProductDraft};
pub use user::{User, UserResponse};
