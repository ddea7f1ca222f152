//! Routine session — step completion and the mask countdown for one routine.

use std::time::Duration;

use uuid::Uuid;

use crate::error::StorageError;
use crate::store::SkinStore;

use super::model::{Routine, upsert_routine};
use super::timer::{Countdown, TimerState, format_countdown};

/// Drives one routine while the user works through it.
///
/// Every change to the routine is written back to the stored routine
/// collection (upsert by id). Dropping the session aborts any countdown.
pub struct RoutineSession {
    routine: Routine,
    store: SkinStore,
    countdown: Countdown,
}

impl RoutineSession {
    pub fn new(routine: Routine, store: SkinStore, tick: Duration) -> Self {
        Self {
            routine,
            store,
            countdown: Countdown::new(tick),
        }
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    /// Flip a step's completion flag and persist the routine.
    ///
    /// Returns `Ok(false)` without touching anything if the step is unknown.
    /// The session's copy only changes once the write succeeds.
    pub async fn toggle_step_completion(&mut self, step_id: Uuid) -> Result<bool, StorageError> {
        let mut updated = self.routine.clone();
        let Some(step) = updated.steps.iter_mut().find(|s| s.id == step_id) else {
            tracing::debug!(%step_id, "Toggle ignored: unknown step");
            return Ok(false);
        };
        step.is_completed = !step.is_completed;
        let completed = step.is_completed;

        self.save_routine(&updated).await?;
        self.routine = updated;
        tracing::debug!(%step_id, completed, "Step toggled");
        Ok(true)
    }

    /// Start the countdown for a timed step.
    ///
    /// Returns `false` (and leaves the timer alone) if the step is unknown or
    /// carries no duration.
    pub async fn start_timer(&mut self, step_id: Uuid) -> bool {
        let Some(duration) = self.routine.step(step_id).and_then(|s| s.timer_duration) else {
            tracing::debug!(%step_id, "Timer not started: step has no duration");
            return false;
        };
        self.countdown.start(step_id, duration).await;
        tracing::info!(%step_id, seconds = duration, "Timer started");
        true
    }

    pub async fn stop_timer(&mut self) {
        self.countdown.stop().await;
    }

    /// Mark the routine and every step complete, then persist.
    pub async fn complete_routine(&mut self) -> Result<(), StorageError> {
        let mut updated = self.routine.clone();
        updated.is_completed = true;
        for step in &mut updated.steps {
            step.is_completed = true;
        }
        self.save_routine(&updated).await?;
        self.routine = updated;
        tracing::info!(routine_id = %self.routine.id, "Routine completed");
        Ok(())
    }

    /// Completed steps over total steps; 0 for a routine without steps.
    pub fn progress(&self) -> f64 {
        self.routine.progress()
    }

    pub async fn timer(&self) -> TimerState {
        self.countdown.snapshot().await
    }

    pub async fn seconds_remaining(&self) -> u32 {
        self.timer().await.seconds_remaining
    }

    pub async fn is_running(&self) -> bool {
        self.timer().await.is_running
    }

    pub async fn formatted_timer(&self) -> String {
        format_countdown(self.seconds_remaining().await)
    }

    /// End the session, stopping any countdown, and hand back the routine.
    pub async fn close(mut self) -> Routine {
        self.countdown.stop().await;
        self.routine
    }

    async fn save_routine(&self, routine: &Routine) -> Result<(), StorageError> {
        let mut routines = self.store.load_routines().await?;
        upsert_routine(&mut routines, routine);
        self.store.save_routines(&routines).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::profile::{SkinConcern, SkinType};
    use crate::routine::{ProductType, TimeOfDay, generate_steps};
    use crate::store::MemoryStore;
    use crate::store::memory::ReadOnlyStore;

    fn oily_evening() -> Routine {
        let concerns: BTreeSet<SkinConcern> = [SkinConcern::EnlargedPores].into_iter().collect();
        Routine::new(
            TimeOfDay::Evening,
            generate_steps(SkinType::Oily, TimeOfDay::Evening, &concerns),
            Utc::now(),
        )
    }

    fn session(routine: Routine) -> (SkinStore, RoutineSession) {
        let store = SkinStore::new(Arc::new(MemoryStore::new()));
        let session = RoutineSession::new(routine, store.clone(), Duration::from_secs(1));
        (store, session)
    }

    fn step_of(routine: &Routine, product_type: ProductType) -> Uuid {
        routine
            .steps
            .iter()
            .find(|s| s.product_type == product_type)
            .map(|s| s.id)
            .unwrap()
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let routine = oily_evening();
        let toner = step_of(&routine, ProductType::Toner);
        let (store, mut session) = session(routine);

        assert!(session.toggle_step_completion(toner).await.unwrap());
        assert!(session.routine().step(toner).unwrap().is_completed);

        let stored = store.load_routines().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].step(toner).unwrap().is_completed);

        session.toggle_step_completion(toner).await.unwrap();
        assert!(!session.routine().step(toner).unwrap().is_completed);
        let stored = store.load_routines().await.unwrap();
        assert_eq!(stored.len(), 1, "toggle must upsert, not append");
        assert!(!stored[0].step(toner).unwrap().is_completed);
    }

    #[tokio::test]
    async fn toggle_unknown_step_is_a_no_op() {
        let routine = oily_evening();
        let before = routine.clone();
        let (store, mut session) = session(routine);

        assert!(!session.toggle_step_completion(Uuid::new_v4()).await.unwrap());
        assert_eq!(session.routine(), &before);
        assert!(store.load_routines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn timer_needs_a_duration() {
        let routine = oily_evening();
        let toner = step_of(&routine, ProductType::Toner);
        let (_, mut session) = session(routine);

        assert!(!session.start_timer(toner).await);
        assert!(!session.is_running().await);
        assert!(!session.start_timer(Uuid::new_v4()).await);
        assert!(!session.is_running().await);
    }

    #[tokio::test(start_paused = true)]
    async fn mask_timer_counts_down_and_stops() {
        let routine = oily_evening();
        let mask = step_of(&routine, ProductType::Mask);
        let (_, mut session) = session(routine);

        assert!(session.start_timer(mask).await);
        assert!(session.is_running().await);
        assert_eq!(session.seconds_remaining().await, 600);
        assert_eq!(session.formatted_timer().await, "10:00");

        tokio::time::sleep(Duration::from_millis(61_500)).await;
        assert_eq!(session.seconds_remaining().await, 539);
        assert_eq!(session.timer().await.active_step_id, Some(mask));

        session.stop_timer().await;
        let timer = session.timer().await;
        assert!(!timer.is_running);
        assert_eq!(timer.seconds_remaining, 0);
        assert!(timer.active_step_id.is_none());
    }

    #[tokio::test]
    async fn complete_routine_forces_every_step() {
        let routine = oily_evening();
        let toner = step_of(&routine, ProductType::Toner);
        let (store, mut session) = session(routine);

        session.toggle_step_completion(toner).await.unwrap();
        session.complete_routine().await.unwrap();

        assert!(session.routine().is_completed);
        assert!(session.routine().steps.iter().all(|s| s.is_completed));
        assert_eq!(session.progress(), 1.0);

        let stored = store.load_routines().await.unwrap();
        assert!(stored[0].is_completed);
        assert!(stored[0].steps.iter().all(|s| s.is_completed));
    }

    #[tokio::test]
    async fn progress_of_empty_routine_is_zero() {
        let (_, session) = session(Routine::new(TimeOfDay::Morning, Vec::new(), Utc::now()));
        assert_eq!(session.progress(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn close_stops_the_timer() {
        let routine = oily_evening();
        let mask = step_of(&routine, ProductType::Mask);
        let id = routine.id;
        let (_, mut session) = session(routine);
        session.start_timer(mask).await;
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let timer = session.countdown.state_handle();

        let routine = session.close().await;
        assert_eq!(routine.id, id);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let state = timer.read().await.clone();
        assert!(!state.is_running);
        assert_eq!(state.seconds_remaining, 0);
        assert!(state.active_step_id.is_none());
        // Session and task are both gone.
        assert_eq!(Arc::strong_count(&timer), 1);
    }

    #[tokio::test]
    async fn failed_write_leaves_session_unchanged() {
        let routine = oily_evening();
        let toner = step_of(&routine, ProductType::Toner);
        let before = routine.clone();
        let store = SkinStore::new(Arc::new(ReadOnlyStore {
            inner: MemoryStore::new(),
        }));
        let mut session = RoutineSession::new(routine, store, Duration::from_secs(1));

        assert!(session.toggle_step_completion(toner).await.is_err());
        assert_eq!(session.routine(), &before);

        assert!(session.complete_routine().await.is_err());
        assert!(!session.routine().is_completed);
        assert_eq!(session.progress(), 0.0);
    }
}
