//! User store adapter
//!
//! [`UserStore`] is the identity-provider contract: create/find/update/delete
//! plus field accessors and mutators. It performs no validation beyond
//! existence checks, and no normalization; case-folding is the caller's job.
//!
//! [`PgUserStore`] is the single production implementation, backed by the
//! `users` table. Mutations use conditional writes (`ON CONFLICT DO NOTHING`,
//! affected-row-count checks) so concurrent callers cannot race a separate
//! existence probe.
//!
//! # Example
//!
//! ```no_run
//! use todolist_data::models::User;
//! use todolist_data::store::{PgUserStore, UserStore};
//! # use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool) -> Result<(), Box<dyn std::error::Error>> {
//! let store = PgUserStore::new(pool);
//!
//! let user = User::new("alice", "ALICE");
//! store.create(&user).await?;
//!
//! let found = store.find_by_normalized_name("ALICE").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

/// Error type for user store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A user with the same id already exists
    #[error("User with id {0} already exists")]
    Conflict(Uuid),

    /// No user with that id exists
    #[error("User with id {0} does not exist")]
    NotFound(Uuid),

    /// Persisting a password hash failed
    #[error("Failed to persist password hash for user {id}")]
    PasswordHash {
        /// Id of the user whose hash could not be stored
        id: Uuid,
        /// Underlying database error
        #[source]
        source: sqlx::Error,
    },

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// The identity-provider contract
///
/// One canonical set of user operations, implemented once against the chosen
/// storage technology. Accessors read the in-memory [`User`]; mutators write
/// through to the store immediately.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new user
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if a user with the same id already exists; the
    /// existing record is left untouched.
    async fn create(&self, user: &User) -> Result<(), StoreError>;

    /// Overwrites user name, normalized user name, and password hash on the
    /// existing record
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if the id does not exist; the store is left
    /// unchanged.
    async fn update(&self, user: &User) -> Result<(), StoreError>;

    /// Removes the user record
    ///
    /// # Errors
    ///
    /// `StoreError::NotFound` if no user with that id exists.
    async fn delete(&self, user: &User) -> Result<(), StoreError>;

    /// Returns the matching user, or `None`; absence is not an error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Looks up a user by normalized name, or `None`; absence is not an error
    async fn find_by_normalized_name(&self, name: &str) -> Result<Option<User>, StoreError>;

    /// Sets the display user name and persists it immediately
    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<String>,
    ) -> Result<(), StoreError>;

    /// Sets the normalized user name and persists it immediately
    ///
    /// The value is stored as given; normalization happened in the caller.
    async fn set_normalized_name(
        &self,
        user: &mut User,
        normalized_name: Option<String>,
    ) -> Result<(), StoreError>;

    /// Sets the password hash and persists it immediately
    ///
    /// # Errors
    ///
    /// Persistence failures are wrapped as `StoreError::PasswordHash` with
    /// the affected user id.
    async fn set_password_hash(&self, user: &mut User, hash: String) -> Result<(), StoreError>;

    /// Returns the user's id
    fn user_id(&self, user: &User) -> Uuid {
        user.id
    }

    /// Returns the display user name
    fn user_name(&self, user: &User) -> Option<String> {
        user.user_name.clone()
    }

    /// Returns the normalized user name
    fn normalized_name(&self, user: &User) -> Option<String> {
        user.normalized_user_name.clone()
    }

    /// Returns the stored password hash
    fn password_hash(&self, user: &User) -> Option<String> {
        user.password_hash.clone()
    }

    /// True iff a non-empty password hash is stored
    fn has_password(&self, user: &User) -> bool {
        user.has_password()
    }
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a store over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn persist_fields(&self, user: &User) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET user_name = $2, normalized_user_name = $3, password_hash = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.normalized_user_name)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        // Conditional insert instead of a separate existence probe
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, user_name, normalized_user_name, password_hash)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(&user.user_name)
        .bind(&user.normalized_user_name)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(user.id));
        }

        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        if self.persist_fields(user).await? == 0 {
            return Err(StoreError::NotFound(user.id));
        }

        Ok(())
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user.id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(user.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, normalized_user_name, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_normalized_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, user_name, normalized_user_name, password_hash
            FROM users
            WHERE normalized_user_name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<String>,
    ) -> Result<(), StoreError> {
        user.user_name = user_name;

        if self.persist_fields(user).await? == 0 {
            return Err(StoreError::NotFound(user.id));
        }

        Ok(())
    }

    async fn set_normalized_name(
        &self,
        user: &mut User,
        normalized_name: Option<String>,
    ) -> Result<(), StoreError> {
        user.normalized_user_name = normalized_name;

        if self.persist_fields(user).await? == 0 {
            return Err(StoreError::NotFound(user.id));
        }

        Ok(())
    }

    async fn set_password_hash(&self, user: &mut User, hash: String) -> Result<(), StoreError> {
        user.password_hash = Some(hash);

        let rows = self
            .persist_fields(user)
            .await
            .map_err(|source| StoreError::PasswordHash {
                id: user.id,
                source,
            })?;

        if rows == 0 {
            return Err(StoreError::NotFound(user.id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::nil();

        let err = StoreError::Conflict(id);
        assert_eq!(
            err.to_string(),
            format!("User with id {} already exists", id)
        );

        let err = StoreError::NotFound(id);
        assert_eq!(
            err.to_string(),
            format!("User with id {} does not exist", id)
        );
    }

    #[test]
    fn test_password_hash_error_keeps_source() {
        let err = StoreError::PasswordHash {
            id: Uuid::nil(),
            source: sqlx::Error::PoolClosed,
        };

        assert!(err.to_string().contains("password hash"));
        assert!(std::error::Error::source(&err).is_some());
    }

    // Database-backed behavior of PgUserStore is covered by the live-database
    // tests in tests/pg_store_tests.rs.
}
