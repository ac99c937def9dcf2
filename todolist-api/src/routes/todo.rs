//! To-do item endpoints with ownership enforcement
//!
//! All routes require a validated bearer token; the caller's identity comes
//! from the [`AuthUser`] extension inserted by the middleware.
//!
//! Ownership is enforced here, not in the repository: an item is only
//! visible or mutable by the user whose id is stamped on it. A mismatch is a
//! distinct error kind surfaced as 401 naming the item id. The owner id on
//! create and update always comes from the token, never from the client.
//!
//! # Endpoints
//!
//! - `GET    /api/todo` - List the caller's items
//! - `GET    /api/todo/:id` - Fetch one item
//! - `POST   /api/todo` - Create an item (201 + Location header)
//! - `PUT    /api/todo/:id` - Update an item
//! - `DELETE /api/todo/:id` - Delete an item, returning it

use crate::{
    app::{AppState, AuthUser},
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Deserialize;
use todolist_data::models::{BriefToDoItem, FullToDoItem};
use validator::Validate;

/// Creation request body
///
/// There is deliberately no owner field; the caller's identity is stamped on
/// before the repository sees the item.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateToDoItemRequest {
    /// Title (required)
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    /// Optional description
    pub description: Option<String>,
}

/// Lists all to-do items owned by the caller
pub async fn get_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Json<Vec<FullToDoItem>>> {
    let items = state.todos.get_all().await?;
    let items: Vec<FullToDoItem> = items
        .into_iter()
        .filter(|item| item.user_id == auth.id)
        .collect();

    Ok(Json(items))
}

/// Fetches a single item by id
///
/// # Errors
///
/// - `404 Not Found`: No item with that id
/// - `401 Unauthorized`: The item belongs to another user
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<FullToDoItem>> {
    let item = state.todos.get_by_id(id).await?;
    if item.user_id != auth.id {
        return Err(ApiError::NotOwner(id));
    }

    Ok(Json(item))
}

/// Creates a new item owned by the caller
///
/// Responds 201 with the full item and a `Location` header pointing at it.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<CreateToDoItemRequest>,
) -> ApiResult<impl IntoResponse> {
    req.validate()?;

    let item = state
        .todos
        .add(BriefToDoItem {
            title: req.title,
            description: req.description,
            user_id: auth.id,
        })
        .await?;

    let location = format!("/api/todo/{}", item.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(item),
    ))
}

/// Updates an item's title, description, and completion flag
///
/// The path id and body id must match. The owner id in the body is replaced
/// with the caller's identity before delegation, so an update can never
/// reassign ownership.
///
/// # Errors
///
/// - `400 Bad Request`: Path/body id mismatch
/// - `404 Not Found`: No item with that id
/// - `401 Unauthorized`: The item belongs to another user
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(mut item): Json<FullToDoItem>,
) -> ApiResult<Json<FullToDoItem>> {
    if id != item.id {
        return Err(ApiError::BadRequest(
            "Path id and body id do not match".to_string(),
        ));
    }

    let existing = state.todos.get_by_id(id).await?;
    if existing.user_id != auth.id {
        return Err(ApiError::NotOwner(id));
    }

    item.user_id = auth.id;
    let updated = state.todos.update(item).await?;
    Ok(Json(updated))
}

/// Deletes an item, returning its last persisted state
///
/// # Errors
///
/// - `404 Not Found`: No item with that id
/// - `401 Unauthorized`: The item belongs to another user
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<Json<FullToDoItem>> {
    let existing = state.todos.get_by_id(id).await?;
    if existing.user_id != auth.id {
        return Err(ApiError::NotOwner(id));
    }

    let deleted = state.todos.delete(id).await?;
    Ok(Json(deleted))
}
