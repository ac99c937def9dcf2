//! API route handlers
//!
//! - `health`: Health check endpoint
//! - `authentication`: Registration and login
//! - `todo`: Per-user to-do item CRUD with ownership enforcement

pub mod authentication;
pub mod health;
pub mod todo;
