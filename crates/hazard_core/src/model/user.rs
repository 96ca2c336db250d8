//! User model.
//!
//! Users are referential parents only: they own hazards and take them along
//! when deleted.

use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier.
pub type UserId = i64;

/// Persisted user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Unique across all users.
    pub username: String,
    /// Unique across all users.
    pub email: String,
}

/// Insert request for a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }
}
