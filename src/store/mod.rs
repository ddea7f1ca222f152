//! Persistence layer — key/value documents behind a typed facade.

pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod skin_store;
pub mod traits;

pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use skin_store::{SkinStore, keys};
pub use traits::KeyValueStore;

use std::sync::Arc;

use crate::config::AppConfig;

/// Open the libSQL database named by `config` behind a [`SkinStore`].
pub async fn open(config: &AppConfig) -> crate::error::Result<SkinStore> {
    let backend = LibSqlStore::new_local(&config.db_path).await?;
    Ok(SkinStore::new(Arc::new(backend)))
}
