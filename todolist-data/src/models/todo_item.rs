//! To-do item model
//!
//! To-do items come in two representations:
//!
//! - [`BriefToDoItem`]: the creation form: title, optional description, and
//!   the owning user id stamped by the endpoint logic
//! - [`FullToDoItem`]: the persisted form: server-assigned id plus the
//!   completion flag
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE todo_items (
//!     id SERIAL PRIMARY KEY,
//!     title VARCHAR(255) NOT NULL,
//!     description TEXT,
//!     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE
//! );
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Creation representation of a to-do item
///
/// The owning user id is never taken from the client; the endpoint logic
/// stamps the authenticated caller's id before the repository sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefToDoItem {
    /// Title (required)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Owning user id
    pub user_id: Uuid,
}

/// Full representation of a persisted to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FullToDoItem {
    /// Server-assigned id, immutable once assigned
    pub id: i32,

    /// Title (required)
    pub title: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// Completion flag, false on creation
    pub is_completed: bool,

    /// Owning user id, immutable after creation
    pub user_id: Uuid,
}
