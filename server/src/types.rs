//! Stored documents and wire payloads for `/api/todos`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo record as stored in the collection and sent over the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub is_done: bool,
}

/// A record that has not been inserted yet and therefore has no id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub text: String,
    pub is_done: bool,
}

impl NewTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_done: false,
        }
    }

    pub(crate) fn with_id(self, id: Uuid) -> Todo {
        Todo {
            id,
            text: self.text,
            is_done: self.is_done,
        }
    }
}

/// `POST /api/todos` body. Any field besides `text` is ignored.
#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
}

/// `PUT /api/todos/{id}` body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    pub is_done: bool,
}

/// Confirmation body returned by update and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// `DELETE /api/todos/completed` body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    pub deleted_count: u64,
    pub message: String,
}
