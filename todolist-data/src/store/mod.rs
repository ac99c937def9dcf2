//! Persistence adapters
//!
//! - `users`: the user store adapter, the identity-provider contract
//!   implemented against PostgreSQL
//! - `todos`: the to-do item repository

pub mod todos;
pub mod users;

pub use todos::{PgToDoItemRepository, RepoError, ToDoItemRepository};
pub use users::{PgUserStore, StoreError, UserStore};
