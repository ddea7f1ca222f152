//! Backend-agnostic key/value storage trait.

use async_trait::async_trait;

use crate::error::StorageError;

/// Whole-value key/value persistence.
///
/// Every entity (profile, routine collection, diary collection, ...) is
/// stored as one JSON document and replaced in full on write.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the document under `key`, if any.
    async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError>;

    /// Insert or replace the document under `key`.
    async fn set_value(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError>;
}
