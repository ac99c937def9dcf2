//! # To-Do List API Server Library
//!
//! This library provides the HTTP surface of the to-do list service.
//!
//! ## Modules
//!
//! - `app`: Application state, bearer-token middleware, and router builder
//! - `config`: Configuration management
//! - `error`: Error handling and HTTP response mapping
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod routes;
