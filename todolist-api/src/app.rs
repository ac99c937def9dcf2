//! Application state and router builder
//!
//! This module defines the shared application state, the bearer-token
//! middleware, and the function that assembles the Axum router.
//!
//! # Architecture
//!
//! ```text
//! /
//! ├── /health                        # Health check (public)
//! └── /api/
//!     ├── /authentication/           # Public
//!     │   ├── POST /register
//!     │   └── POST /login
//!     └── /todo/                     # Bearer token required
//!         ├── GET    /
//!         ├── POST   /
//!         ├── GET    /:id
//!         ├── PUT    /:id
//!         └── DELETE /:id
//! ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use todolist_data::auth::jwt::{self, TokenConfig};
use todolist_data::store::{ToDoItemRepository, UserStore};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The store
/// and repository are injected as trait objects so tests can substitute
/// in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    /// User store adapter
    pub users: Arc<dyn UserStore>,

    /// To-do item repository
    pub todos: Arc<dyn ToDoItemRepository>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        users: Arc<dyn UserStore>,
        todos: Arc<dyn ToDoItemRepository>,
        config: Config,
    ) -> Self {
        Self {
            users,
            todos,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing configuration
    pub fn token_config(&self) -> &TokenConfig {
        &self.config.jwt
    }
}

/// Identity of the authenticated caller, extracted from the validated token
///
/// Handlers on protected routes read this from request extensions via the
/// `Extension` extractor.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// User id (the token's subject claim)
    pub id: Uuid,

    /// Display user name
    pub user_name: String,
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Authentication routes (public, no auth required)
    let authentication_routes = Router::new()
        .route("/register", post(routes::authentication::register))
        .route("/login", post(routes::authentication::login));

    // To-do routes (require a valid bearer token)
    let todo_routes = Router::new()
        .route(
            "/",
            get(routes::todo::get_all).post(routes::todo::add),
        )
        .route(
            "/:id",
            get(routes::todo::get_by_id)
                .put(routes::todo::update)
                .delete(routes::todo::delete),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    Router::new()
        .merge(health_routes)
        .nest("/api/authentication", authentication_routes)
        .nest("/api/todo", todo_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Extracts and validates the JWT from the Authorization header, then
/// injects [`AuthUser`] into request extensions.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.token_config())?;

    let auth_user = AuthUser {
        id: claims.sub,
        user_name: claims.user_name,
    };
    req.extensions_mut().insert(auth_user);

    Ok(next.run(req).await)
}
