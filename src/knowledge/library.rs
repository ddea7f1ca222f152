//! Knowledge library — built-in and custom articles, bookmarks, reading history.

use std::collections::{BTreeSet, HashSet};

use uuid::Uuid;

use crate::error::StorageError;
use crate::profile::SkinType;
use crate::store::SkinStore;

use super::articles::default_articles;
use super::model::{Article, ArticleCategory};

pub struct KnowledgeLibrary {
    store: SkinStore,
    builtin_ids: HashSet<Uuid>,
    /// Built-ins first, then custom articles in the order they were added.
    articles: Vec<Article>,
    bookmarks: BTreeSet<Uuid>,
    read: BTreeSet<Uuid>,
}

impl KnowledgeLibrary {
    pub async fn load(store: SkinStore) -> Result<Self, StorageError> {
        let mut articles = default_articles();
        let builtin_ids = articles.iter().map(|a| a.id).collect();
        articles.extend(store.load_custom_articles().await?);

        let bookmarks = store.load_bookmarked_articles().await?.into_iter().collect();
        let read = store.load_read_articles().await?.into_iter().collect();

        Ok(Self {
            store,
            builtin_ids,
            articles,
            bookmarks,
            read,
        })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn article(&self, id: Uuid) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Articles in `category` (any when `None`) whose title or content
    /// contains `search`, ignoring case. A blank search matches everything.
    pub fn filter(&self, category: Option<ArticleCategory>, search: &str) -> Vec<&Article> {
        let search = search.trim();
        self.articles
            .iter()
            .filter(|a| category.is_none_or(|c| a.category == c))
            .filter(|a| search.is_empty() || a.matches(search))
            .collect()
    }

    /// Flip the bookmark on an article. Returns whether it is now bookmarked.
    pub async fn toggle_bookmark(&mut self, id: Uuid) -> Result<bool, StorageError> {
        let mut bookmarks = self.bookmarks.clone();
        let bookmarked = if bookmarks.remove(&id) {
            false
        } else {
            bookmarks.insert(id);
            true
        };
        let ids: Vec<Uuid> = bookmarks.iter().copied().collect();
        self.store.save_bookmarked_articles(&ids).await?;
        self.bookmarks = bookmarks;
        Ok(bookmarked)
    }

    pub fn is_bookmarked(&self, id: Uuid) -> bool {
        self.bookmarks.contains(&id)
    }

    pub fn bookmarked(&self) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| self.bookmarks.contains(&a.id))
            .collect()
    }

    /// Record that an article was opened. Returns `false` if it was already read.
    pub async fn mark_as_read(&mut self, id: Uuid) -> Result<bool, StorageError> {
        if self.read.contains(&id) {
            return Ok(false);
        }
        let ids: Vec<Uuid> = self.read.iter().copied().chain([id]).collect();
        self.store.save_read_articles(&ids).await?;
        self.read.insert(id);
        Ok(true)
    }

    pub fn is_read(&self, id: Uuid) -> bool {
        self.read.contains(&id)
    }

    /// Articles worth suggesting for a skin type. Nothing without a type.
    pub fn recommended_for(&self, skin_type: Option<SkinType>) -> Vec<&Article> {
        let Some(skin_type) = skin_type else {
            return Vec::new();
        };
        self.articles
            .iter()
            .filter(|a| match skin_type {
                SkinType::Dry => {
                    a.title_contains("moistur")
                        || a.title_contains("dry")
                        || a.category == ArticleCategory::Basics
                }
                SkinType::Oily => {
                    a.title_contains("acne")
                        || a.title_contains("pore")
                        || a.category == ArticleCategory::Problems
                }
                SkinType::Sensitive => {
                    a.title_contains("sensitive") || a.category == ArticleCategory::Basics
                }
                SkinType::Combination | SkinType::Normal => true,
            })
            .collect()
    }

    pub async fn add_custom_article(&mut self, article: Article) -> Result<(), StorageError> {
        let mut custom = self.store.load_custom_articles().await?;
        custom.push(article.clone());
        self.store.save_custom_articles(&custom).await?;
        tracing::debug!(article_id = %article.id, title = %article.title, "Custom article added");
        self.articles.push(article);
        Ok(())
    }

    /// Delete a custom article. Built-in articles can't be deleted; returns
    /// `Ok(false)` for those and for unknown ids.
    pub async fn delete_custom_article(&mut self, id: Uuid) -> Result<bool, StorageError> {
        if self.builtin_ids.contains(&id) {
            tracing::debug!(article_id = %id, "Refusing to delete built-in article");
            return Ok(false);
        }
        let mut custom = self.store.load_custom_articles().await?;
        let before = custom.len();
        custom.retain(|a| a.id != id);
        if custom.len() == before {
            return Ok(false);
        }
        self.store.save_custom_articles(&custom).await?;
        self.articles.retain(|a| a.id != id);
        tracing::debug!(article_id = %id, "Custom article deleted");
        Ok(true)
    }

    /// Whether an article is user-authored (anything not built in).
    pub fn is_custom(&self, id: Uuid) -> bool {
        !self.builtin_ids.contains(&id)
    }
}
