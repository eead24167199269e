//! In-memory key-value store.
//!
//! Values live for as long as the store does. Useful for tests and for
//! sessions that should not touch the filesystem.

use crate::key::validate_key;
use crate::store::KeyValueStore;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Ephemeral key-value store backed by a `HashMap`.
///
/// Cloning a `MemoryStore` yields a handle to the same underlying map, so a
/// test can keep one handle and give another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(Mutex::new(values)),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        let values = self.values.lock().await;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        validate_key(key)?;
        let mut values = self.values.lock().await;
        tracing::trace!(key, bytes = value.len(), "Storing value in memory");
        values.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("projects").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_returns_latest_value() {
        let store = MemoryStore::new();
        store.set("projects", "[]".to_string()).await.unwrap();
        store.set("projects", "[1]".to_string()).await.unwrap();

        assert_eq!(store.get("projects").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn clones_share_values() {
        let store = MemoryStore::new();
        let handle = store.clone();

        store.set("projects", "shared".to_string()).await.unwrap();

        assert_eq!(
            handle.get("projects").await.unwrap().as_deref(),
            Some("shared")
        );
    }

    #[tokio::test]
    async fn with_value_prepopulates() {
        let store = MemoryStore::with_value("projects", "not json");
        assert_eq!(
            store.get("projects").await.unwrap().as_deref(),
            Some("not json")
        );
    }

    #[tokio::test]
    async fn invalid_key_is_rejected() {
        let store = MemoryStore::new();
        assert!(store.get("a/b").await.is_err());
        assert!(store.set("", String::new()).await.is_err());
    }
}
