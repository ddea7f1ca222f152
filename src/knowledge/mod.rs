//! Knowledge base — short educational articles plus the user's own notes.

pub mod articles;
pub mod library;
pub mod model;

pub use articles::default_articles;
pub use library::KnowledgeLibrary;
pub use model::{Article, ArticleCategory, Difficulty};
