//! Authentication primitives
//!
//! - `jwt`: Bearer token issuance and validation (HS256)
//! - `password`: Argon2id hashing/verification and password rules

pub mod jwt;
pub mod password;
