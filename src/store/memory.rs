//! In-memory store, used by tests and throwaway sessions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::traits::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Store whose reads see `inner` and whose writes always fail.
#[cfg(test)]
pub(crate) struct ReadOnlyStore {
    pub inner: MemoryStore,
}

#[cfg(test)]
#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        self.inner.get_value(key).await
    }

    async fn set_value(&self, key: &str, _value: &serde_json::Value) -> Result<(), StorageError> {
        Err(StorageError::Query(format!("{key}: store is read-only")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_replace() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        store
            .set_value("routines", &serde_json::json!([1, 2]))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get_value("routines").await.unwrap(),
            Some(serde_json::json!([1, 2]))
        );

        store
            .set_value("routines", &serde_json::json!([]))
            .await
            .unwrap();
        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.get_value("routines").await.unwrap(),
            Some(serde_json::json!([]))
        );
    }

    #[tokio::test]
    async fn read_only_store_rejects_writes() {
        let store = ReadOnlyStore {
            inner: MemoryStore::new(),
        };
        let err = store
            .set_value("routines", &serde_json::json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Query(_)));
        assert!(store.get_value("routines").await.unwrap().is_none());
    }
}
