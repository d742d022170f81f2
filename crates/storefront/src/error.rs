//! Unified error handling for the storefront.
//!
//! Provides a unified `AppError` type that maps every failure to an HTTP
//! status and a JSON body of the form `{"error": "<message>"}`. All route
//! handlers return `Result<T, AppError>`.
//!
//! # Taxonomy
//!
//! - Validation errors (malformed request bodies) -> 400, no state change
//! - Missing resources (cart/order/product/user) -> 404, no state change
//! - Business-rule failures (`EmptyCart`, `InsufficientStock`) -> 400 with
//!   a human-readable reason and no partial mutation
//!
//! Every error is recoverable at the request boundary: the stores are
//! exactly as they were before the failed call.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::CheckoutError;
use crate::stores::{CartError, UserError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("{0}")]
    Cart(#[from] CartError),

    /// Checkout business rule violated.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// User registration conflict.
    #[error("{0}")]
    User(#[from] UserError),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Authentication failed.
    #[error("{0}")]
    Unauthorized(String),

    /// Access to another user's resource.
    #[error("{0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Cart(_) => StatusCode::NOT_FOUND,
            Self::Checkout(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::User(UserError::EmailTaken) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
