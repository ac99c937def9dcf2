//! # To-Do List Data Layer
//!
//! This crate contains the persistence layer and authentication primitives
//! shared by the to-do list API server.
//!
//! ## Module Organization
//!
//! - `models`: Canonical user and to-do item shapes
//! - `db`: PostgreSQL connection pool and migration runner
//! - `auth`: JWT issuance/validation and Argon2id password hashing
//! - `store`: User store adapter and to-do item repository

pub mod auth;
pub mod db;
pub mod models;
pub mod store;

/// Current version of the to-do list data library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
