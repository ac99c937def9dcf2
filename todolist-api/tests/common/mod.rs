//! Common test utilities for the router integration tests
//!
//! Provides in-memory implementations of the user store and to-do item
//! repository (mirroring the typed Conflict/NotFound semantics of the
//! PostgreSQL adapters), a test context that wires them into the real
//! router, and small request helpers.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use todolist_api::app::{build_router, AppState};
use todolist_api::config::{ApiConfig, Config};
use todolist_data::auth::jwt::TokenConfig;
use todolist_data::db::pool::DatabaseConfig;
use todolist_data::models::{BriefToDoItem, FullToDoItem, User};
use todolist_data::store::{RepoError, StoreError, ToDoItemRepository, UserStore};
use tower::Service as _;
use uuid::Uuid;

/// In-memory user store with the same typed results as the Postgres adapter
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Conflict(user.id));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                existing.user_name = user.user_name.clone();
                existing.normalized_user_name = user.normalized_user_name.clone();
                existing.password_hash = user.password_hash.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound(user.id)),
        }
    }

    async fn delete(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != user.id);
        if users.len() == before {
            return Err(StoreError::NotFound(user.id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_normalized_name(&self, name: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.normalized_user_name.as_deref() == Some(name))
            .cloned())
    }

    async fn set_user_name(
        &self,
        user: &mut User,
        user_name: Option<String>,
    ) -> Result<(), StoreError> {
        user.user_name = user_name;
        self.update(user).await
    }

    async fn set_normalized_name(
        &self,
        user: &mut User,
        normalized_name: Option<String>,
    ) -> Result<(), StoreError> {
        user.normalized_user_name = normalized_name;
        self.update(user).await
    }

    async fn set_password_hash(&self, user: &mut User, hash: String) -> Result<(), StoreError> {
        user.password_hash = Some(hash);
        self.update(user).await
    }
}

/// In-memory to-do repository with sequential server-assigned ids
#[derive(Default)]
pub struct InMemoryToDoItemRepository {
    items: Mutex<Vec<FullToDoItem>>,
    next_id: AtomicI32,
}

#[async_trait]
impl ToDoItemRepository for InMemoryToDoItemRepository {
    async fn get_by_id(&self, id: i32) -> Result<FullToDoItem, RepoError> {
        let items = self.items.lock().unwrap();
        items
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(RepoError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<FullToDoItem>, RepoError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn add(&self, item: BriefToDoItem) -> Result<FullToDoItem, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let full = FullToDoItem {
            id,
            title: item.title,
            description: item.description,
            is_completed: false,
            user_id: item.user_id,
        };
        self.items.lock().unwrap().push(full.clone());
        Ok(full)
    }

    async fn update(&self, item: FullToDoItem) -> Result<FullToDoItem, RepoError> {
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => {
                // Owner never changes on update
                existing.title = item.title;
                existing.description = item.description;
                existing.is_completed = item.is_completed;
                Ok(existing.clone())
            }
            None => Err(RepoError::NotFound(item.id)),
        }
    }

    async fn delete(&self, id: i32) -> Result<FullToDoItem, RepoError> {
        let mut items = self.items.lock().unwrap();
        let pos = items
            .iter()
            .position(|i| i.id == id)
            .ok_or(RepoError::NotFound(id))?;
        Ok(items.remove(pos))
    }
}

/// Test context wiring the in-memory stores into the real router
pub struct TestContext {
    pub app: Router,
    pub config: Config,
}

impl TestContext {
    pub fn new() -> Self {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig::default(),
            jwt: TokenConfig {
                secret: "integration-test-secret-key-32-bytes!".to_string(),
                issuer: "todolist".to_string(),
                audience: "todolist-clients".to_string(),
            },
        };

        let state = AppState::new(
            Arc::new(InMemoryUserStore::default()),
            Arc::new(InMemoryToDoItemRepository::default()),
            config.clone(),
        );

        Self {
            app: build_router(state),
            config,
        }
    }
}

/// Sends one request through the router and returns status, headers, and the
/// parsed JSON body (Null when the body is empty)
pub async fn send(
    ctx: &TestContext,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = ctx.app.clone().call(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, headers, json)
}

/// Registers a user and returns their token
pub async fn register(ctx: &TestContext, user_name: &str, password: &str) -> String {
    let (status, _, body) = send(
        ctx,
        "POST",
        "/api/authentication/register",
        None,
        Some(serde_json::json!({
            "userName": user_name,
            "password": password,
            "confirmPassword": password,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "registration failed: {}", body);
    body["token"].as_str().expect("token in response").to_string()
}

/// Creates a to-do item and returns its full representation
pub async fn create_item(
    ctx: &TestContext,
    token: &str,
    title: &str,
    description: Option<&str>,
) -> Value {
    let (status, _, body) = send(
        ctx,
        "POST",
        "/api/todo",
        Some(token),
        Some(serde_json::json!({
            "title": title,
            "description": description,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "creation failed: {}", body);
    body
}
