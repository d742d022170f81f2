//! User route handlers.
//!
//! Demo-grade accounts: registration and login exist so the surrounding
//! endpoints have users to key on, but the issued token is opaque and
//! never validated anywhere (authentication is out of scope).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use minimart_core::UserId;

use crate::error::{AppError, Result};
use crate::models::{User, UserResponse};
use crate::state::AppState;
use crate::stores::NewUser;

use super::json_body;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Mint an opaque demo session token.
fn issue_token(user: &User) -> String {
    format!("token-{}-{}", user.id, Uuid::new_v4().simple())
}

/// `POST /users/register` - create an account.
pub async fn register(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let request = json_body(payload)?;
    let user = state.users().insert(NewUser {
        email: request.email,
        name: request.name,
        password: request.password,
    })?;

    let token = issue_token(&user);
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, Some(token))),
    ))
}

/// `POST /users/login` - exchange credentials for a demo token.
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserResponse>> {
    let request = json_body(payload)?;
    let user = state
        .users()
        .authenticate(&request.email, &request.password)
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let token = issue_token(&user);
    Ok(Json(UserResponse::from_user(&user, Some(token))))
}

/// `GET /users/{id}` - user profile, without a token and never with a password.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state
        .users()
        .find_by_id(&UserId::new(id))
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(UserResponse::from_user(&user, None)))
}
