//! Skin profile — skin types, concerns, and questionnaire classification.

pub mod classifier;
pub mod model;

pub use classifier::{ANSWER_SCALE, MAX_ANSWER, QUESTION_COUNT, QUESTIONS, classify};
pub use model::{SkinConcern, SkinType, UserProfile, parse_allergies};
