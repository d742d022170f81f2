//! User domain types.

use serde::{Deserialize, Serialize};

use minimart_core::UserId;

/// A storefront user account.
///
/// The password is held verbatim and never serialized. Real credential
/// handling is out of scope: the login endpoint issues an opaque token
/// that nothing validates.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub password: String,
}

/// User payload returned to clients: never includes the password.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl UserResponse {
    /// Build a response from a user, optionally attaching a session token.
    #[must_use]
    pub fn from_user(user: &User, token: Option<String>) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            token,
        }
    }
}
