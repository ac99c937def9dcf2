//! User identity model
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY,
//!     user_name VARCHAR(256),
//!     normalized_user_name VARCHAR(256),
//!     password_hash VARCHAR(255)
//! );
//!
//! CREATE UNIQUE INDEX idx_users_normalized_user_name
//!     ON users (normalized_user_name);
//! ```
//!
//! The unique index permits multiple NULL normalized names; uniqueness only
//! applies once a name is set. Normalization (uppercasing) is the caller's
//! responsibility; the model and the store never case-fold on their own.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User identity record
///
/// Passwords are stored as Argon2id hashes, never in plaintext. The hash is
/// `None` until a password has been set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID v4), generated at creation and immutable
    pub id: Uuid,

    /// Display user name
    pub user_name: Option<String>,

    /// Uppercased user name used for lookups
    ///
    /// Unique across all users when non-null
    pub normalized_user_name: Option<String>,

    /// Argon2id password hash (PHC string format)
    pub password_hash: Option<String>,
}

impl User {
    /// Creates a user with a freshly generated id and no password
    ///
    /// The caller supplies the already-normalized name; this constructor does
    /// not case-fold.
    pub fn new(user_name: impl Into<String>, normalized_user_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_name: Some(user_name.into()),
            normalized_user_name: Some(normalized_user_name.into()),
            password_hash: None,
        }
    }

    /// Returns true iff a non-empty password hash is stored
    pub fn has_password(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }
}
