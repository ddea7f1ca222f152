//! Skin diary — daily condition ratings with notes and photos.

pub mod journal;
pub mod model;

pub use journal::Diary;
pub use model::{
    DEFAULT_CONDITION, DiaryEntry, MAX_CONDITION, MIN_CONDITION, average_condition, recent_entries,
};
