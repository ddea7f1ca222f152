//! Article data model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleCategory {
    Basics,
    Ingredients,
    Routines,
    Problems,
    Myths,
}

impl ArticleCategory {
    pub const ALL: [ArticleCategory; 5] = [
        Self::Basics,
        Self::Ingredients,
        Self::Routines,
        Self::Problems,
        Self::Myths,
    ];
}

impl std::fmt::Display for ArticleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Basics => "Basics",
            Self::Ingredients => "Ingredients",
            Self::Routines => "Routines",
            Self::Problems => "Problems",
            Self::Myths => "Myths",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Expert => write!(f, "Expert"),
        }
    }
}

/// A library article, built in or written by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: ArticleCategory,
    pub difficulty: Difficulty,
}

impl Article {
    /// A new user-authored article with a random id.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: ArticleCategory,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            category,
            difficulty,
        }
    }

    /// Case-insensitive substring match over title or content.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.content.to_lowercase().contains(&needle)
    }

    pub(crate) fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }
}
