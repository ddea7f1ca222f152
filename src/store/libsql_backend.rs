//! libSQL backend — async `KeyValueStore` implementation.
//!
//! Supports local file and in-memory databases. Each key maps to one row of
//! the `documents` table holding the JSON text of the value.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::info;

use crate::error::StorageError;
use crate::store::migrations;
use crate::store::traits::KeyValueStore;

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
pub struct LibSqlStore {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlStore {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Open(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to open libSQL database: {e}")))?;

        let store = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(store)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, StorageError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| StorageError::Open(format!("Failed to create in-memory database: {e}")))?;
        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, StorageError> {
        let conn = db
            .connect()
            .map_err(|e| StorageError::Open(format!("Failed to create connection: {e}")))?;
        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[async_trait]
impl KeyValueStore for LibSqlStore {
    async fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, StorageError> {
        let mut rows = self
            .conn()
            .query("SELECT value FROM documents WHERE key = ?1", params![key])
            .await
            .map_err(|e| StorageError::Query(format!("get_value: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => {
                let text: String = row
                    .get(0)
                    .map_err(|e| StorageError::Query(format!("get_value: {e}")))?;
                let value = serde_json::from_str(&text)?;
                Ok(Some(value))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(StorageError::Query(format!("get_value: {e}"))),
        }
    }

    async fn set_value(&self, key: &str, value: &serde_json::Value) -> Result<(), StorageError> {
        let now = Utc::now().to_rfc3339();
        let text = serde_json::to_string(value)?;

        self.conn()
            .execute(
                "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT (key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, text, now],
            )
            .await
            .map_err(|e| StorageError::Query(format!("set_value: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> LibSqlStore {
        LibSqlStore::new_memory().await.unwrap()
    }

    #[tokio::test]
    async fn documents_upsert() {
        let db = test_db().await;
        let value = serde_json::json!({"skin_type": "Oily", "allergies": ["nuts"]});

        db.set_value("userProfile", &value).await.unwrap();
        let fetched = db.get_value("userProfile").await.unwrap().unwrap();
        assert_eq!(fetched["skin_type"], "Oily");

        // Upsert replaces the whole document
        db.set_value("userProfile", &serde_json::json!({"skin_type": "Dry"}))
            .await
            .unwrap();
        let fetched = db.get_value("userProfile").await.unwrap().unwrap();
        assert_eq!(fetched["skin_type"], "Dry");
        assert!(fetched.get("allergies").is_none());
    }

    #[tokio::test]
    async fn get_missing_key() {
        let db = test_db().await;
        assert!(db.get_value("routines").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("skin.db");

        {
            let db = LibSqlStore::new_local(&path).await.unwrap();
            db.set_value("hasCompletedOnboarding", &serde_json::json!(true))
                .await
                .unwrap();
        }

        let reopened = LibSqlStore::new_local(&path).await.unwrap();
        assert_eq!(
            reopened.get_value("hasCompletedOnboarding").await.unwrap(),
            Some(serde_json::json!(true))
        );
    }
}
