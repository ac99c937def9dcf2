//! Password hashing using Argon2id
//!
//! Hashing and verification are the only operations; the stored value is a
//! PHC-format string that embeds the algorithm parameters and salt.
//!
//! # Example
//!
//! ```
//! use todolist_data::auth::password::{hash_password, verify_password};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("Secret1")?;
//! assert!(verify_password("Secret1", &hash)?);
//! assert!(!verify_password("wrong", &hash)?);
//! # Ok(())
//! # }
//! ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

/// Hashes a password using Argon2id with default parameters
///
/// A fresh 16-byte salt is generated from the OS RNG for every call, so
/// hashing the same password twice yields different strings.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored hash
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` if the stored value is not a valid
/// PHC string, `PasswordError::VerifyError` for other failures. A wrong
/// password is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!(
            "Verification failed: {}",
            e
        ))),
    }
}

/// Validates password rules for registration
///
/// Requirements: at least 4 characters, at least one digit, one lowercase
/// letter, and one uppercase letter. Non-alphanumeric characters are not
/// required.
///
/// # Example
///
/// ```
/// use todolist_data::auth::password::validate_password_rules;
///
/// assert!(validate_password_rules("Secret1").is_ok());
/// assert!(validate_password_rules("abc").is_err());
/// ```
pub fn validate_password_rules(password: &str) -> Result<(), String> {
    if password.chars().count() < 4 {
        return Err("Password must be at least 4 characters long".to_string());
    }

    if !password.chars().any(|c| c.is_numeric()) {
        return Err("Password must contain at least one digit".to_string());
    }

    if !password.chars().any(|c| c.is_lowercase()) {
        return Err("Password must contain at least one lowercase letter".to_string());
    }

    if !password.chars().any(|c| c.is_uppercase()) {
        return Err("Password must contain at least one uppercase letter".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_produces_phc_string() {
        let hash = hash_password("Secret1").expect("Hash should succeed");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_hash_password_produces_different_salts() {
        let hash1 = hash_password("same_password").expect("Hash 1 should succeed");
        let hash2 = hash_password("same_password").expect("Hash 2 should succeed");
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("Secret1").expect("Hash should succeed");
        assert!(verify_password("Secret1", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("Secret1").expect("Hash should succeed");
        assert!(!verify_password("wrong", &hash).expect("Verify should succeed"));
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("Secret1", "not-a-hash").is_err());
    }

    #[test]
    fn test_password_rules_accept_valid() {
        for password in ["Secret1", "Ab1x", "Pass123word"] {
            assert!(
                validate_password_rules(password).is_ok(),
                "Password '{}' should be valid",
                password
            );
        }
    }

    #[test]
    fn test_password_rules_too_short() {
        let result = validate_password_rules("A1b");
        assert!(result.unwrap_err().contains("at least 4 characters"));
    }

    #[test]
    fn test_password_rules_no_digit() {
        let result = validate_password_rules("Secret");
        assert!(result.unwrap_err().contains("digit"));
    }

    #[test]
    fn test_password_rules_no_lowercase() {
        let result = validate_password_rules("SECRET1");
        assert!(result.unwrap_err().contains("lowercase"));
    }

    #[test]
    fn test_password_rules_no_uppercase() {
        let result = validate_password_rules("secret1");
        assert!(result.unwrap_err().contains("uppercase"));
    }
}
