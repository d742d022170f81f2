//! User account store.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use minimart_core::UserId;

use crate::models::User;

/// Errors from user store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Another account already uses this email address.
    #[error("Email already in use")]
    EmailTaken,
}

/// Fields supplied when registering a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Default)]
struct UserState {
    users: Vec<User>,
    next_id: u64,
}

/// In-memory user account store.
#[derive(Debug)]
pub struct UserStore {
    state: RwLock<UserState>,
}

impl UserStore {
    /// Create an empty user store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(UserState {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a user store seeded with the demo account.
    #[must_use]
    pub fn with_demo_data() -> Self {
        let demo = User {
            id: UserId::new("u1"),
            email: "john@example.com".to_string(),
            name: "John Doe".to_string(),
            password: "password123".to_string(),
        };

        Self {
            state: RwLock::new(UserState {
                users: vec![demo],
                next_id: 2,
            }),
        }
    }

    /// Register a new user, assigning a fresh ID.
    ///
    /// # Errors
    ///
    /// `EmailTaken` if an account with the email already exists.
    pub fn insert(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut state = self.write();
        if state.users.iter().any(|u| u.email == new_user.email) {
            return Err(UserError::EmailTaken);
        }

        let id = UserId::new(format!("u{}", state.next_id));
        state.next_id += 1;

        let user = User {
            id,
            email: new_user.email,
            name: new_user.name,
            password: new_user.password,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    /// Look up a user by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &UserId) -> Option<User> {
        self.read().users.iter().find(|u| &u.id == id).cloned()
    }

    /// Check credentials, returning the user on a match.
    ///
    /// Demo-grade comparison: passwords are held verbatim, per the
    /// no-authentication scope of this backend.
    #[must_use]
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        self.read()
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .cloned()
    }

    fn read(&self) -> RwLockReadGuard<'_, UserState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}
