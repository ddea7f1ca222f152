//! Home screen and profile summaries assembled from stored data.

use chrono::{DateTime, FixedOffset, Timelike, Utc};

use crate::clock::{Clock, local_date};
use crate::config::AppConfig;
use crate::diary::{DiaryEntry, average_condition, recent_entries};
use crate::error::StorageError;
use crate::profile::UserProfile;
use crate::routine::{Routine, TimeOfDay};
use crate::store::SkinStore;

/// Diary entries shown on the home screen.
pub const RECENT_ENTRY_COUNT: usize = 3;

/// Which half of the day `now` falls in, local to `offset`.
pub fn time_of_day_at(now: DateTime<Utc>, cutoff_hour: u32, offset: FixedOffset) -> TimeOfDay {
    if now.with_timezone(&offset).hour() < cutoff_hour {
        TimeOfDay::Morning
    } else {
        TimeOfDay::Evening
    }
}

/// First routine for the current half of the day that is scheduled today
/// and not yet completed.
pub fn current_routine(
    routines: &[Routine],
    now: DateTime<Utc>,
    cutoff_hour: u32,
    offset: FixedOffset,
) -> Option<&Routine> {
    let time_of_day = time_of_day_at(now, cutoff_hour, offset);
    let today = local_date(now, offset);
    routines.iter().find(|r| {
        r.time_of_day == time_of_day
            && local_date(r.scheduled_date, offset) == today
            && !r.is_completed
    })
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: Option<UserProfile>,
    pub routines: Vec<Routine>,
    pub current_routine: Option<Routine>,
    /// Newest first.
    pub recent_entries: Vec<DiaryEntry>,
}

impl Dashboard {
    pub async fn load(
        store: &SkinStore,
        clock: &dyn Clock,
        config: &AppConfig,
    ) -> Result<Self, StorageError> {
        let profile = store.load_profile().await?;
        let routines = store.load_routines().await?;
        let current = current_routine(
            &routines,
            clock.now(),
            config.morning_cutoff_hour,
            config.utc_offset,
        )
        .cloned();
        let entries = store.load_diary_entries().await?;

        Ok(Self {
            profile,
            routines,
            current_routine: current,
            recent_entries: recent_entries(&entries, RECENT_ENTRY_COUNT),
        })
    }

    pub fn has_active_routine(&self) -> bool {
        self.current_routine.is_some()
    }

    /// Progress of the current routine; 0 when there is none.
    pub fn routine_progress(&self) -> f64 {
        self.current_routine.as_ref().map_or(0.0, Routine::progress)
    }
}

/// Totals shown on the profile screen.
#[derive(Debug, Clone)]
pub struct ProfileSummary {
    pub profile: Option<UserProfile>,
    pub completed_routines: usize,
    pub total_diary_entries: usize,
    pub average_condition: f64,
}

impl ProfileSummary {
    pub async fn load(store: &SkinStore) -> Result<Self, StorageError> {
        let profile = store.load_profile().await?;
        let routines = store.load_routines().await?;
        let entries = store.load_diary_entries().await?;

        Ok(Self {
            profile,
            completed_routines: routines.iter().filter(|r| r.is_completed).count(),
            total_diary_entries: entries.len(),
            average_condition: average_condition(&entries),
        })
    }
}
