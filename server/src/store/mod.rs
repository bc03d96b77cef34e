//! The todo collection.
//!
//! # Design
//! Handlers talk to storage only through `TodoStore`, a document-store shaped
//! trait (insert, find, update one, delete one, delete many). The store owns id
//! assignment. Each call touches a single document or a single predicate
//! sweep under one lock acquisition; there are no multi-document transactions.

mod file;
mod memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::types::{NewTodo, Todo};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored collection is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Predicate document selecting records by field values. Unset fields match
/// anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    pub is_done: Option<bool>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn completed() -> Self {
        Self {
            is_done: Some(true),
        }
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.is_done.map_or(true, |done| todo.is_done == done)
    }
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Persist a new record under a freshly assigned id.
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// All records matching `filter`, in insertion order.
    async fn find(&self, filter: &Filter) -> Result<Vec<Todo>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError>;

    /// Set `is_done` on one record. Returns `false` when no record matched.
    async fn update_done(&self, id: Uuid, is_done: bool) -> Result<bool, StoreError>;

    /// Returns `false` when no record matched.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Remove every record matching `filter` and report how many went.
    async fn delete_many(&self, filter: &Filter) -> Result<u64, StoreError>;
}

/// Collection operations shared by the in-memory and file-backed stores.
pub(crate) mod collection {
    use super::Filter;
    use crate::types::Todo;
    use uuid::Uuid;

    pub fn update_done(todos: &mut [Todo], id: Uuid, is_done: bool) -> bool {
        match todos.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                todo.is_done = is_done;
                true
            }
            None => false,
        }
    }

    pub fn delete_by_id(todos: &mut Vec<Todo>, id: Uuid) -> bool {
        let before = todos.len();
        todos.retain(|t| t.id != id);
        todos.len() != before
    }

    pub fn delete_many(todos: &mut Vec<Todo>, filter: &Filter) -> u64 {
        let before = todos.len();
        todos.retain(|t| !filter.matches(t));
        (before - todos.len()) as u64
    }
}
