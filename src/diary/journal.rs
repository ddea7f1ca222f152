//! Diary — the stored collection of entries and the questions asked of it.

use chrono::{DateTime, Datelike, FixedOffset, Utc};
use uuid::Uuid;

use crate::clock::local_date;
use crate::error::StorageError;
use crate::store::SkinStore;

use super::model::{DiaryEntry, average_condition, clamp_condition, recent_entries};

/// In-memory copy of the diary, written back whole on every change.
pub struct Diary {
    store: SkinStore,
    offset: FixedOffset,
    entries: Vec<DiaryEntry>,
}

impl Diary {
    /// Load the diary. Calendar questions are answered in `offset` local time.
    pub async fn load(store: SkinStore, offset: FixedOffset) -> Result<Self, StorageError> {
        let entries = store.load_diary_entries().await?;
        tracing::debug!(count = entries.len(), "Diary loaded");
        Ok(Self {
            store,
            offset,
            entries,
        })
    }

    pub fn entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace (by id) an entry and persist the diary.
    pub async fn save_entry(&mut self, mut entry: DiaryEntry) -> Result<(), StorageError> {
        entry.skin_condition = clamp_condition(entry.skin_condition);
        let id = entry.id;
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|e| e.id == id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        self.store.save_diary_entries(&entries).await?;
        self.entries = entries;
        tracing::debug!(entry_id = %id, "Diary entry saved");
        Ok(())
    }

    /// Remove an entry. Returns `Ok(false)` if no entry has that id.
    pub async fn delete_entry(&mut self, id: Uuid) -> Result<bool, StorageError> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        let entries: Vec<DiaryEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.store.save_diary_entries(&entries).await?;
        self.entries = entries;
        tracing::debug!(entry_id = %id, "Diary entry deleted");
        Ok(true)
    }

    /// First entry on the same local calendar day as `date`.
    pub fn entry_for_date(&self, date: DateTime<Utc>) -> Option<&DiaryEntry> {
        let day = local_date(date, self.offset);
        self.entries
            .iter()
            .find(|e| local_date(e.date, self.offset) == day)
    }

    /// Entries dated within the given local month.
    pub fn entries_for_month(&self, year: i32, month: u32) -> Vec<&DiaryEntry> {
        self.entries
            .iter()
            .filter(|e| {
                let day = local_date(e.date, self.offset);
                day.year() == year && day.month() == month
            })
            .collect()
    }

    /// The `limit` newest entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<DiaryEntry> {
        recent_entries(&self.entries, limit)
    }

    pub fn average_condition(&self) -> f64 {
        average_condition(&self.entries)
    }

    /// Conditions in date order, oldest first.
    pub fn condition_trend(&self) -> Vec<f64> {
        let mut dated: Vec<(DateTime<Utc>, u8)> = self
            .entries
            .iter()
            .map(|e| (e.date, e.skin_condition))
            .collect();
        dated.sort_by_key(|(date, _)| *date);
        dated.into_iter().map(|(_, c)| f64::from(c)).collect()
    }
}
