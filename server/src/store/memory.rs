use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{collection, Filter, StoreError, TodoStore};
use crate::types::{NewTodo, Todo};

/// Volatile collection kept in process memory. Cloning shares the same data.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.with_id(Uuid::new_v4());
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.read().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update_done(&self, id: Uuid, is_done: bool) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(collection::update_done(&mut todos, id, is_done))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(collection::delete_by_id(&mut todos, id))
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64, StoreError> {
        let mut todos = self.todos.write().await;
        Ok(collection::delete_many(&mut todos, filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_unique_ids() {
        let store = MemoryStore::new();
        let a = store.insert(NewTodo::new("a")).await.unwrap();
        let b = store.insert(NewTodo::new("b")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert!(!a.is_done);
    }

    #[tokio::test]
    async fn find_keeps_insertion_order() {
        let store = MemoryStore::new();
        for text in ["first", "second", "third"] {
            store.insert(NewTodo::new(text)).await.unwrap();
        }
        let texts: Vec<String> = store
            .find(&Filter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn update_done_changes_only_the_flag() {
        let store = MemoryStore::new();
        let todo = store.insert(NewTodo::new("walk dog")).await.unwrap();
        assert!(store.update_done(todo.id, true).await.unwrap());
        let stored = store.find_by_id(todo.id).await.unwrap().unwrap();
        assert_eq!(stored.text, "walk dog");
        assert!(stored.is_done);
    }

    #[tokio::test]
    async fn delete_by_id_missing_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.delete_by_id(Uuid::new_v4()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_many_removes_completed() {
        let store = MemoryStore::new();
        for done in [true, true, false] {
            let todo = store.insert(NewTodo::new("x")).await.unwrap();
            store.update_done(todo.id, done).await.unwrap();
        }
        assert_eq!(store.delete_many(&Filter::completed()).await.unwrap(), 2);
        let rest = store.find(&Filter::all()).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert!(!rest[0].is_done);
    }

    #[tokio::test]
    async fn clones_share_the_collection() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.insert(NewTodo::new("shared")).await.unwrap();
        assert_eq!(other.find(&Filter::all()).await.unwrap().len(), 1);
    }
}
