//! # To-Do List API Server
//!
//! Multi-user to-do list service: register/login with username+password,
//! receive a signed bearer token, and manage personal to-do items scoped by
//! ownership.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p todolist-api
//! ```

use std::sync::Arc;
use todolist_api::app::{build_router, AppState};
use todolist_api::config::Config;
use todolist_data::db::{migrations, pool};
use todolist_data::store::{PgToDoItemRepository, PgUserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todolist_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "To-do list API server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let db = pool::create_pool(config.database.clone()).await?;
    migrations::run_migrations(&db).await?;

    let state = AppState::new(
        Arc::new(PgUserStore::new(db.clone())),
        Arc::new(PgToDoItemRepository::new(db)),
        config.clone(),
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app).await?;

    Ok(())
}
