//! Database models for the to-do list service
//!
//! This module holds the two persisted shapes of the system:
//!
//! - `user`: Identity records looked up during registration and login
//! - `todo_item`: Per-user to-do entries in their brief and full forms
//!
//! There is exactly one canonical `User` shape; every layer (store adapter,
//! token issuer, endpoint logic) works with the same struct.

pub mod todo_item;
pub mod user;

pub use todo_item::{BriefToDoItem, FullToDoItem};
pub use user::User;
