use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{collection, Filter, StoreError, TodoStore};
use crate::types::{NewTodo, Todo};

/// Collection persisted as a single JSON array document.
///
/// The whole collection is held in memory and every mutation that changes it
/// rewrites the snapshot: serialize to `<path>.tmp`, then rename over `<path>`. A mutation
/// whose snapshot fails to write is not applied in memory either.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    todos: Mutex<Vec<Todo>>,
}

impl FileStore {
    /// Load the collection at `path`. A missing file is an empty collection.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let todos = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(path = %path.display(), count = todos.len(), "opened todo collection");
        Ok(Self {
            path,
            todos: Mutex::new(todos),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn write_snapshot(&self, todos: &[Todo]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut tmp = OsString::from(self.path.as_os_str());
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let bytes = serde_json::to_vec_pretty(todos)?;
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Apply `mutate` to a copy of the collection, persist it, then commit.
    async fn mutate<T>(&self, mutate: impl FnOnce(&mut Vec<Todo>) -> T) -> Result<T, StoreError> {
        let mut todos = self.todos.lock().await;
        let mut next = todos.clone();
        let out = mutate(&mut next);
        if next == *todos {
            return Ok(out);
        }
        self.write_snapshot(&next).await?;
        *todos = next;
        Ok(out)
    }
}

#[async_trait]
impl TodoStore for FileStore {
    async fn insert(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let todo = todo.with_id(Uuid::new_v4());
        let inserted = todo.clone();
        self.mutate(move |todos| todos.push(todo)).await?;
        Ok(inserted)
    }

    async fn find(&self, filter: &Filter) -> Result<Vec<Todo>, StoreError> {
        let todos = self.todos.lock().await;
        Ok(todos.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Todo>, StoreError> {
        let todos = self.todos.lock().await;
        Ok(todos.iter().find(|t| t.id == id).cloned())
    }

    async fn update_done(&self, id: Uuid, is_done: bool) -> Result<bool, StoreError> {
        self.mutate(|todos| collection::update_done(todos, id, is_done))
            .await
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.mutate(|todos| collection::delete_by_id(todos, id)).await
    }

    async fn delete_many(&self, filter: &Filter) -> Result<u64, StoreError> {
        self.mutate(|todos| collection::delete_many(todos, filter))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("todos.json")).await.unwrap();
        assert!(store.find(&Filter::all()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");

        let store = FileStore::open(&path).await.unwrap();
        let kept = store.insert(NewTodo::new("Buy milk")).await.unwrap();
        let gone = store.insert(NewTodo::new("Walk dog")).await.unwrap();
        store.update_done(kept.id, true).await.unwrap();
        store.delete_by_id(gone.id).await.unwrap();
        drop(store);

        let reopened = FileStore::open(&path).await.unwrap();
        let todos = reopened.find(&Filter::all()).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, kept.id);
        assert!(todos[0].is_done);
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("todos.json");
        let store = FileStore::open(&path).await.unwrap();
        store.insert(NewTodo::new("x")).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        std::fs::write(&path, b"{ not json").unwrap();
        let err = FileStore::open(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn delete_many_persists_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let store = FileStore::open(&path).await.unwrap();
        for done in [true, false, true] {
            let todo = store.insert(NewTodo::new("x")).await.unwrap();
            store.update_done(todo.id, done).await.unwrap();
        }
        assert_eq!(store.delete_many(&Filter::completed()).await.unwrap(), 2);

        let on_disk: Vec<Todo> = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 1);
    }

    #[tokio::test]
    async fn unmatched_mutations_leave_disk_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.json");
        let store = FileStore::open(&path).await.unwrap();

        assert!(!store.update_done(Uuid::new_v4(), true).await.unwrap());
        assert!(!store.delete_by_id(Uuid::new_v4()).await.unwrap());
        assert_eq!(store.delete_many(&Filter::completed()).await.unwrap(), 0);
        assert!(!path.exists());

        let todo = store.insert(NewTodo::new("x")).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        // Setting the flag it already has is not a change.
        assert!(store.update_done(todo.id, false).await.unwrap());
        assert!(!path.exists());
    }
}
