//! `/api/todos` handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use uuid::Uuid;

use crate::error::AppError;
use crate::store::{Filter, TodoStore};
use crate::types::{CreateTodo, DeletedCount, Message, NewTodo, Todo, UpdateTodo};

pub type SharedStore = Arc<dyn TodoStore>;

/// Route table relative to `/api/todos`. The static `/completed` segment
/// takes precedence over `/{id}`.
pub fn todo_routes() -> Router<SharedStore> {
    Router::new()
        .route("/", get(list_todos).post(create_todo))
        .route("/completed", delete(delete_completed))
        .route("/{id}", get(get_todo).put(update_todo).delete(delete_todo))
}

/// Parse a path id before any storage access.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

async fn list_todos(State(store): State<SharedStore>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = store
        .find(&Filter::all())
        .await
        .map_err(AppError::storage("Error fetching todos"))?;
    Ok(Json(todos))
}

async fn create_todo(
    State(store): State<SharedStore>,
    Json(input): Json<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    if input.text.trim().is_empty() {
        return Err(AppError::BlankText);
    }
    let todo = store
        .insert(NewTodo::new(input.text))
        .await
        .map_err(AppError::storage("Error creating todo"))?;
    tracing::info!(id = %todo.id, "todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, AppError> {
    let id = parse_id(&id)?;
    store
        .find_by_id(id)
        .await
        .map_err(AppError::storage("Error fetching todo"))?
        .map(Json)
        .ok_or(AppError::NotFound)
}

async fn update_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Message>, AppError> {
    let id = parse_id(&id)?;
    let matched = store
        .update_done(id, input.is_done)
        .await
        .map_err(AppError::storage("Error updating todo"))?;
    if !matched {
        return Err(AppError::NotFound);
    }
    tracing::info!(%id, is_done = input.is_done, "todo updated");
    Ok(Json(Message::new("Todo updated successfully")))
}

async fn delete_todo(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Message>, AppError> {
    let id = parse_id(&id)?;
    let deleted = store
        .delete_by_id(id)
        .await
        .map_err(AppError::storage("Error deleting todo"))?;
    if !deleted {
        return Err(AppError::NotFound);
    }
    tracing::info!(%id, "todo deleted");
    Ok(Json(Message::new("Todo deleted successfully")))
}

async fn delete_completed(State(store): State<SharedStore>) -> Result<Json<DeletedCount>, AppError> {
    let deleted_count = store
        .delete_many(&Filter::completed())
        .await
        .map_err(AppError::storage("Error deleting completed todos"))?;
    tracing::info!(deleted_count, "completed todos deleted");
    Ok(Json(DeletedCount {
        deleted_count,
        message: format!("{deleted_count} completed todos deleted successfully"),
    }))
}
