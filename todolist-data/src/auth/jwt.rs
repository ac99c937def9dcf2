//! JWT token issuance and validation
//!
//! Tokens are signed with HS256 (HMAC-SHA256) and identify one user for
//! seven days. There is no refresh mechanism; expiry is absolute.
//!
//! # Claims
//!
//! - `sub`: user id (the subject every ownership check compares against)
//! - `user_name`: display user name
//! - `unique_name`: normalized (uppercased) user name
//! - `jti`: freshly generated token id
//! - `iss` / `aud`: issuer and audience from configuration
//! - `nbf` / `iat`: issuance time
//! - `exp`: issuance time + 7 days
//!
//! # Example
//!
//! ```
//! use todolist_data::auth::jwt::{generate_token, validate_token, TokenConfig};
//! use todolist_data::models::User;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TokenConfig {
//!     secret: "test-secret-key-at-least-32-bytes-long".to_string(),
//!     issuer: "todolist".to_string(),
//!     audience: "todolist-clients".to_string(),
//! };
//!
//! let user = User::new("alice", "ALICE");
//! let token = generate_token(&user, &config)?;
//!
//! let claims = validate_token(&token, &config)?;
//! assert_eq!(claims.sub, user.id);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::User;

/// Token lifetime; expiry is absolute, there is no refresh
const TOKEN_LIFETIME_DAYS: i64 = 7;

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Issuer claim did not match the configured issuer
    #[error("Invalid token issuer")]
    InvalidIssuer,

    /// Audience claim did not match the configured audience
    #[error("Invalid token audience")]
    InvalidAudience,
}

/// Signing configuration for token issuance and validation
///
/// The secret should be at least 32 bytes and is supplied from the
/// environment, never hard-coded.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Symmetric HS256 signing key
    pub secret: String,

    /// Value of the `iss` claim
    pub issuer: String,

    /// Value of the `aud` claim
    pub audience: String,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user id
    pub sub: Uuid,

    /// Display user name
    pub user_name: String,

    /// Normalized (uppercased) user name
    pub unique_name: String,

    /// Unique token id
    pub jti: Uuid,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a user with the default seven-day expiry
    pub fn new(user: &User, config: &TokenConfig) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::days(TOKEN_LIFETIME_DAYS);

        Self {
            sub: user.id,
            user_name: user.user_name.clone().unwrap_or_default(),
            unique_name: user.normalized_user_name.clone().unwrap_or_default(),
            jti: Uuid::new_v4(),
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Checks if the token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Generates a signed bearer token for an authenticated user
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails.
pub fn generate_token(user: &User, config: &TokenConfig) -> Result<String, JwtError> {
    let claims = Claims::new(user, config);
    create_token(&claims, &config.secret)
}

/// Signs the given claims with HS256
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a token and extracts its claims
///
/// Verifies the signature, issuer, audience, expiry, and not-before time
/// against the configured values.
///
/// # Errors
///
/// Returns an error if any of those checks fail.
pub fn validate_token(token: &str, config: &TokenConfig) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.issuer]);
    validation.set_audience(&[&config.audience]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        jsonwebtoken::errors::ErrorKind::InvalidAudience => JwtError::InvalidAudience,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
