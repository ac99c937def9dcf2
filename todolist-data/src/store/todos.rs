//! To-do item repository
//!
//! Pure CRUD over the `todo_items` table plus the brief-to-full mapping.
//! The repository carries no authorization logic; ownership is enforced by
//! the endpoint layer above it. Missing ids surface as
//! [`RepoError::NotFound`], detected through conditional writes with
//! `RETURNING` rather than a separate existence probe.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{BriefToDoItem, FullToDoItem};

/// Error type for to-do repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// No to-do item with that id exists
    #[error("To-do item with id {0} was not found")]
    NotFound(i32),

    /// Any other database failure
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// CRUD contract for to-do items
#[async_trait]
pub trait ToDoItemRepository: Send + Sync {
    /// Fetches one item by id
    ///
    /// # Errors
    ///
    /// `RepoError::NotFound` if the id does not exist.
    async fn get_by_id(&self, id: i32) -> Result<FullToDoItem, RepoError>;

    /// Fetches all items, unfiltered; callers apply ownership filtering
    async fn get_all(&self) -> Result<Vec<FullToDoItem>, RepoError>;

    /// Inserts a new item from its brief representation
    ///
    /// The server assigns the id and the completion flag starts false.
    async fn add(&self, item: BriefToDoItem) -> Result<FullToDoItem, RepoError>;

    /// Overwrites title, description, and completion flag
    ///
    /// The owning user id is never changed by an update.
    ///
    /// # Errors
    ///
    /// `RepoError::NotFound` if the id does not exist.
    async fn update(&self, item: FullToDoItem) -> Result<FullToDoItem, RepoError>;

    /// Removes an item, returning its last persisted state
    ///
    /// # Errors
    ///
    /// `RepoError::NotFound` if the id does not exist.
    async fn delete(&self, id: i32) -> Result<FullToDoItem, RepoError>;
}

/// PostgreSQL-backed to-do item repository
#[derive(Clone)]
pub struct PgToDoItemRepository {
    pool: PgPool,
}

impl PgToDoItemRepository {
    /// Creates a repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ToDoItemRepository for PgToDoItemRepository {
    async fn get_by_id(&self, id: i32) -> Result<FullToDoItem, RepoError> {
        let item = sqlx::query_as::<_, FullToDoItem>(
            r#"
            SELECT id, title, description, is_completed, user_id
            FROM todo_items
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<FullToDoItem>, RepoError> {
        let items = sqlx::query_as::<_, FullToDoItem>(
            r#"
            SELECT id, title, description, is_completed, user_id
            FROM todo_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    async fn add(&self, item: BriefToDoItem) -> Result<FullToDoItem, RepoError> {
        let created = sqlx::query_as::<_, FullToDoItem>(
            r#"
            INSERT INTO todo_items (title, description, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, is_completed, user_id
            "#,
        )
        .bind(item.title)
        .bind(item.description)
        .bind(item.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, item: FullToDoItem) -> Result<FullToDoItem, RepoError> {
        // user_id is deliberately absent from the SET list
        let updated = sqlx::query_as::<_, FullToDoItem>(
            r#"
            UPDATE todo_items
            SET title = $2, description = $3, is_completed = $4
            WHERE id = $1
            RETURNING id, title, description, is_completed, user_id
            "#,
        )
        .bind(item.id)
        .bind(item.title)
        .bind(item.description)
        .bind(item.is_completed)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(RepoError::NotFound(item.id))
    }

    async fn delete(&self, id: i32) -> Result<FullToDoItem, RepoError> {
        let deleted = sqlx::query_as::<_, FullToDoItem>(
            r#"
            DELETE FROM todo_items
            WHERE id = $1
            RETURNING id, title, description, is_completed, user_id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        deleted.ok_or(RepoError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_id() {
        let err = RepoError::NotFound(42);
        assert_eq!(err.to_string(), "To-do item with id 42 was not found");
    }

    // Database-backed behavior of PgToDoItemRepository is covered by the
    // live-database tests in tests/pg_store_tests.rs.
}
