//! Local session storage.
//!
//! A small string key/value store holding the three session keys. The file
//! store keeps one file per key under a directory; the memory store is for
//! tests and short-lived tools.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::ClientResult;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const PERMISSIONS_KEY: &str = "permissions";

const SESSION_KEYS: [&str; 3] = [TOKEN_KEY, USER_KEY, PERMISSIONS_KEY];

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> ClientResult<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> ClientResult<()>;

    /// Removes every session key. Clearing an empty store is not an error.
    async fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        match tokio::fs::read_to_string(self.path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path(key), value).await?;
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        for key in SESSION_KEYS {
            match tokio::fs::remove_file(self.path(key)).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        self.values.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn exercise(store: &dyn SessionStore) {
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);

        store.set(TOKEN_KEY, "abc").await.unwrap();
        store.set(PERMISSIONS_KEY, "{}").await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("abc"));

        store.set(TOKEN_KEY, "def").await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap().as_deref(), Some("def"));

        store.clear().await.unwrap();
        for key in SESSION_KEYS {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_memory_store() {
        exercise(&MemorySessionStore::new()).await;
    }

    #[tokio::test]
    async fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));
        exercise(&store).await;
    }

    #[tokio::test]
    async fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        FileSessionStore::new(dir.path())
            .set(USER_KEY, r#"{"name":"Ada"}"#)
            .await
            .unwrap();

        let reopened = FileSessionStore::new(dir.path());
        assert_eq!(
            reopened.get(USER_KEY).await.unwrap().as_deref(),
            Some(r#"{"name":"Ada"}"#)
        );
    }
}
