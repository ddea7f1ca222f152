//! Typed access to the documents the app persists.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::diary::DiaryEntry;
use crate::error::StorageError;
use crate::knowledge::Article;
use crate::profile::UserProfile;
use crate::routine::Routine;
use crate::store::traits::KeyValueStore;

/// Keys of the stored documents.
pub mod keys {
    pub const USER_PROFILE: &str = "userProfile";
    pub const ROUTINES: &str = "routines";
    pub const DIARY_ENTRIES: &str = "diaryEntries";
    pub const BOOKMARKED_ARTICLES: &str = "bookmarkedArticles";
    pub const READ_ARTICLES: &str = "readArticles";
    pub const ONBOARDING_COMPLETE: &str = "hasCompletedOnboarding";
    pub const CUSTOM_ARTICLES: &str = "customArticles";
}

/// Typed facade over a [`KeyValueStore`].
///
/// Reads tolerate first-run storage: a missing key yields `None` or an empty
/// collection. A document that no longer decodes is a
/// [`StorageError::Serialization`], so a load-modify-save cycle can never
/// replace it with a partial collection.
#[derive(Clone)]
pub struct SkinStore {
    inner: Arc<dyn KeyValueStore>,
}

impl SkinStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(value) = self.inner.get_value(key).await? else {
            return Ok(None);
        };
        serde_json::from_value(value).map(Some).map_err(|e| {
            tracing::warn!(key, "Stored document does not decode: {}", e);
            StorageError::Serialization(format!("{key}: {e}"))
        })
    }

    async fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let value = serde_json::to_value(value)?;
        self.inner.set_value(key, &value).await
    }

    // ── Profile ─────────────────────────────────────────────────────

    pub async fn load_profile(&self) -> Result<Option<UserProfile>, StorageError> {
        self.load(keys::USER_PROFILE).await
    }

    pub async fn save_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        self.save(keys::USER_PROFILE, profile).await
    }

    // ── Routines ────────────────────────────────────────────────────

    pub async fn load_routines(&self) -> Result<Vec<Routine>, StorageError> {
        Ok(self.load(keys::ROUTINES).await?.unwrap_or_default())
    }

    /// Replace the whole routine collection.
    pub async fn save_routines(&self, routines: &[Routine]) -> Result<(), StorageError> {
        self.save(keys::ROUTINES, routines).await
    }

    // ── Onboarding flag ─────────────────────────────────────────────

    pub async fn is_onboarding_complete(&self) -> Result<bool, StorageError> {
        Ok(self.load(keys::ONBOARDING_COMPLETE).await?.unwrap_or(false))
    }

    pub async fn set_onboarding_complete(&self, complete: bool) -> Result<(), StorageError> {
        self.save(keys::ONBOARDING_COMPLETE, &complete).await
    }

    // ── Diary ───────────────────────────────────────────────────────

    pub async fn load_diary_entries(&self) -> Result<Vec<DiaryEntry>, StorageError> {
        Ok(self.load(keys::DIARY_ENTRIES).await?.unwrap_or_default())
    }

    pub async fn save_diary_entries(&self, entries: &[DiaryEntry]) -> Result<(), StorageError> {
        self.save(keys::DIARY_ENTRIES, entries).await
    }

    // ── Knowledge ───────────────────────────────────────────────────

    pub async fn load_bookmarked_articles(&self) -> Result<Vec<Uuid>, StorageError> {
        Ok(self.load(keys::BOOKMARKED_ARTICLES).await?.unwrap_or_default())
    }

    pub async fn save_bookmarked_articles(&self, ids: &[Uuid]) -> Result<(), StorageError> {
        self.save(keys::BOOKMARKED_ARTICLES, ids).await
    }

    pub async fn load_read_articles(&self) -> Result<Vec<Uuid>, StorageError> {
        Ok(self.load(keys::READ_ARTICLES).await?.unwrap_or_default())
    }

    pub async fn save_read_articles(&self, ids: &[Uuid]) -> Result<(), StorageError> {
        self.save(keys::READ_ARTICLES, ids).await
    }

    pub async fn load_custom_articles(&self) -> Result<Vec<Article>, StorageError> {
        Ok(self.load(keys::CUSTOM_ARTICLES).await?.unwrap_or_default())
    }

    pub async fn save_custom_articles(&self, articles: &[Article]) -> Result<(), StorageError> {
        self.save(keys::CUSTOM_ARTICLES, articles).await
    }
}
