//! Minimart Core - Shared types library.
//!
//! This crate provides common types used across all Minimart components:
//! - `storefront` - The HTTP/JSON storefront backend
//! - `integration-tests` - End-to-end tests against the storefront router
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no storage access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and order statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
