//! Skincare Mentor — skin typing, routine generation, and daily tracking.

pub mod clock;
pub mod config;
pub mod dashboard;
pub mod diary;
pub mod error;
pub mod knowledge;
pub mod onboarding;
pub mod profile;
pub mod routine;
pub mod store;
