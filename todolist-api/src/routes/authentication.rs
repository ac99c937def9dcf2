//! Authentication endpoints
//!
//! # Endpoints
//!
//! - `POST /api/authentication/register` - Register a new user and get a token
//! - `POST /api/authentication/login` - Login and get a token
//!
//! Both respond with `{"token": "eyJ..."}` on success. Registration failures
//! are 400 with field-level detail; login failures are 401 with a plain
//! reason ("Incorrect user name" or "Incorrect password").

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use todolist_data::auth::{jwt, password};
use todolist_data::models::User;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Desired user name
    #[validate(length(min = 1, max = 256, message = "User name is required"))]
    pub user_name: String,

    /// Password (checked against the password rules)
    pub password: String,

    /// Password confirmation, must match `password`
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// User name (matched case-insensitively via normalization)
    pub user_name: String,

    /// Password
    pub password: String,
}

/// Token response, shared by both endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Signed bearer token, valid for seven days
    pub token: String,
}

/// Register a new user
///
/// Validates the password confirmation and password rules, rejects duplicate
/// user names, then persists the user and issues a token.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or the name is taken
/// - `500 Internal Server Error`: Hashing or storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<TokenResponse>> {
    if req.password != req.confirm_password {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "confirmPassword",
            "Passwords do not match",
        )]));
    }

    req.validate()?;

    password::validate_password_rules(&req.password).map_err(|message| {
        ApiError::ValidationError(vec![ValidationErrorDetail::new("password", message)])
    })?;

    // Normalization happens here, never in the store
    let normalized = req.user_name.to_uppercase();

    if state
        .users
        .find_by_normalized_name(&normalized)
        .await?
        .is_some()
    {
        return Err(ApiError::ValidationError(vec![ValidationErrorDetail::new(
            "userName",
            format!("User name '{}' is already taken", req.user_name),
        )]));
    }

    let mut user = User::new(req.user_name, normalized);
    user.password_hash = Some(password::hash_password(&req.password)?);

    state.users.create(&user).await?;

    tracing::info!(user_id = %user.id, "Registered new user");

    let token = jwt::generate_token(&user, state.token_config())?;
    Ok(Json(TokenResponse { token }))
}

/// Login endpoint
///
/// Looks the user up by normalized name and verifies the password against
/// the stored Argon2id hash.
///
/// # Errors
///
/// - `401 Unauthorized`: "Incorrect user name" or "Incorrect password"
/// - `500 Internal Server Error`: Storage or hash-parsing failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let normalized = req.user_name.to_uppercase();

    let user = state
        .users
        .find_by_normalized_name(&normalized)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Incorrect user name".to_string()))?;

    let valid = match user.password_hash.as_deref() {
        Some(hash) if !hash.is_empty() => password::verify_password(&req.password, hash)?,
        _ => false,
    };

    if !valid {
        return Err(ApiError::Unauthorized("Incorrect password".to_string()));
    }

    let token = jwt::generate_token(&user, state.token_config())?;
    Ok(Json(TokenResponse { token }))
}
