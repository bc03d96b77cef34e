//! Action functions a view calls to keep its todo list in step with the server.
//!
//! # Design
//! Every action takes the caller's current list by value, performs exactly one
//! API call and hands back an `Outcome`: the list to display next plus an
//! optional error string. The list is patched only after the server has
//! confirmed the change; a failed call returns the input list untouched, so
//! there is nothing to roll back.
//!
//! Actions share no state. Two actions started concurrently may resolve in
//! either order and the caller decides which list to keep.

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CreateTodo, Todo, UpdateTodo};

const FETCH_ALL_FAILED: &str = "Error fetching todos";
const FETCH_ONE_FAILED: &str = "Error fetching todo";
const CREATE_FAILED: &str = "Error creating todo";
const UPDATE_FAILED: &str = "Error updating todo";
const DELETE_FAILED: &str = "Error deleting todo";
const DELETE_COMPLETED_FAILED: &str = "Error deleting completed todos";

/// Result of one action: the value to display and, on failure, a message
/// prefixed with what was being attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub error: Option<String>,
}

impl<T> Outcome<T> {
    fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    fn failed(value: T, action: &'static str, err: ApiError) -> Self {
        tracing::warn!(action, error = %err, "todo action failed");
        Self {
            value,
            error: Some(format!("{action}: {err}")),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_parts(self) -> (T, Option<String>) {
        (self.value, self.error)
    }
}

/// Client service layer over a `TodoClient` and a `Transport`.
#[derive(Debug, Clone)]
pub struct TodoService<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> TodoService<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Replace the list with the server's. On failure the list is empty.
    pub async fn fetch(&self) -> Outcome<Vec<Todo>> {
        match self.list().await {
            Ok(todos) => Outcome::ok(todos),
            Err(e) => Outcome::failed(Vec::new(), FETCH_ALL_FAILED, e),
        }
    }

    pub async fn fetch_one(&self, id: &str) -> Outcome<Option<Todo>> {
        let result = async {
            let response = self.transport.execute(self.client.build_get_todo(id)?).await?;
            self.client.parse_get_todo(response)
        }
        .await;
        match result {
            Ok(todo) => Outcome::ok(Some(todo)),
            Err(e) => Outcome::failed(None, FETCH_ONE_FAILED, e),
        }
    }

    /// Append a new todo. Blank text is a no-op that never reaches the network.
    pub async fn create(&self, mut todos: Vec<Todo>, text: &str) -> Outcome<Vec<Todo>> {
        if text.trim().is_empty() {
            return Outcome::ok(todos);
        }
        let result = async {
            let input = CreateTodo { text: text.to_string() };
            let response = self.transport.execute(self.client.build_create_todo(&input)?).await?;
            self.client.parse_create_todo(response)
        }
        .await;
        match result {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "todo created");
                todos.push(todo);
                Outcome::ok(todos)
            }
            Err(e) => Outcome::failed(todos, CREATE_FAILED, e),
        }
    }

    /// Ask the server to store `!is_done`, then apply the same flip locally.
    pub async fn toggle(&self, mut todos: Vec<Todo>, id: &str, is_done: bool) -> Outcome<Vec<Todo>> {
        let next = !is_done;
        let result = async {
            let input = UpdateTodo { is_done: next };
            let response = self.transport.execute(self.client.build_update_todo(id, &input)?).await?;
            self.client.parse_update_todo(response)
        }
        .await;
        match result {
            Ok(()) => {
                for todo in todos.iter_mut().filter(|t| t.id == id) {
                    todo.is_done = next;
                }
                Outcome::ok(todos)
            }
            Err(e) => Outcome::failed(todos, UPDATE_FAILED, e),
        }
    }

    pub async fn delete(&self, mut todos: Vec<Todo>, id: &str) -> Outcome<Vec<Todo>> {
        let result = async {
            let response = self.transport.execute(self.client.build_delete_todo(id)?).await?;
            self.client.parse_delete_todo(response)
        }
        .await;
        match result {
            Ok(()) => {
                todos.retain(|t| t.id != id);
                Outcome::ok(todos)
            }
            Err(e) => Outcome::failed(todos, DELETE_FAILED, e),
        }
    }

    /// Remove completed todos on the server, then keep only open ones locally.
    pub async fn delete_completed(&self, mut todos: Vec<Todo>) -> Outcome<Vec<Todo>> {
        let result = async {
            let response = self.transport.execute(self.client.build_delete_completed()).await?;
            self.client.parse_delete_completed(response)
        }
        .await;
        match result {
            Ok(deleted) => {
                tracing::debug!(deleted, "completed todos deleted");
                todos.retain(|t| !t.is_done);
                Outcome::ok(todos)
            }
            Err(e) => Outcome::failed(todos, DELETE_COMPLETED_FAILED, e),
        }
    }

    async fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.transport.execute(self.client.build_list_todos()).await?;
        self.client.parse_list_todos(response)
    }
}
