//! Diary entry data model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_CONDITION: u8 = 1;
pub const MAX_CONDITION: u8 = 5;
pub const DEFAULT_CONDITION: u8 = 3;

/// One day's record of how the skin looked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    /// Self-rated condition, 1 (bad) to 5 (great).
    pub skin_condition: u8,
    #[serde(default)]
    pub notes: String,
    /// Encoded image bytes, if a photo was attached.
    #[serde(default)]
    pub photo: Option<Vec<u8>>,
    /// Routines finished on that day.
    #[serde(default)]
    pub completed_routines: Vec<Uuid>,
}

impl DiaryEntry {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            skin_condition: DEFAULT_CONDITION,
            notes: String::new(),
            photo: None,
            completed_routines: Vec::new(),
        }
    }

    /// Set the condition, clamped into `MIN_CONDITION..=MAX_CONDITION`.
    pub fn set_condition(&mut self, condition: u8) {
        self.skin_condition = clamp_condition(condition);
    }

    pub fn with_condition(mut self, condition: u8) -> Self {
        self.set_condition(condition);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

pub fn clamp_condition(condition: u8) -> u8 {
    condition.clamp(MIN_CONDITION, MAX_CONDITION)
}

/// Mean condition over `entries`; 0.0 when there are none.
pub fn average_condition(entries: &[DiaryEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let sum: u32 = entries.iter().map(|e| u32::from(e.skin_condition)).sum();
    f64::from(sum) / entries.len() as f64
}

/// The `limit` newest entries, newest first.
pub fn recent_entries(entries: &[DiaryEntry], limit: usize) -> Vec<DiaryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}
