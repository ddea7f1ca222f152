//! Single-shot countdown for timed routine steps.
//!
//! The countdown runs as a background tokio task that ticks once per
//! `tick` interval. The [`Countdown`] handle owns that task: stopping,
//! restarting, or dropping the handle aborts it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Observable timer state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimerState {
    pub active_step_id: Option<Uuid>,
    pub seconds_remaining: u32,
    pub is_running: bool,
    /// Bumped on every start so a stale task can't tick a newer countdown.
    generation: u64,
}

impl TimerState {
    fn start(&mut self, step_id: Uuid, seconds: u32) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.active_step_id = Some(step_id);
        self.seconds_remaining = seconds;
        self.is_running = true;
        self.generation
    }

    fn stop(&mut self) {
        self.active_step_id = None;
        self.seconds_remaining = 0;
        self.is_running = false;
    }

    /// Advance by one tick. Returns whether the countdown is still running.
    fn tick(&mut self) -> bool {
        if !self.is_running {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.stop();
        }
        self.is_running
    }
}

/// Render seconds as `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Handle to the countdown task.
pub struct Countdown {
    state: Arc<RwLock<TimerState>>,
    task: Option<JoinHandle<()>>,
    tick: Duration,
}

impl Countdown {
    pub fn new(tick: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(TimerState::default())),
            task: None,
            tick,
        }
    }

    /// Start counting down `seconds` for `step_id`, replacing any running countdown.
    pub async fn start(&mut self, step_id: Uuid, seconds: u32) {
        self.abort_task();
        let generation = self.state.write().await.start(step_id, seconds);

        let state = Arc::clone(&self.state);
        let tick = self.tick;
        self.task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick);
            // Skip immediate first tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let mut state = state.write().await;
                if state.generation != generation {
                    break;
                }
                if !state.tick() {
                    tracing::debug!(%step_id, "Countdown finished");
                    break;
                }
            }
        }));
    }

    /// Cancel the countdown and reset the state. Safe to call when idle.
    pub async fn stop(&mut self) {
        self.abort_task();
        self.state.write().await.stop();
    }

    pub async fn snapshot(&self) -> TimerState {
        self.state.read().await.clone()
    }

    #[cfg(test)]
    pub(crate) fn state_handle(&self) -> Arc<RwLock<TimerState>> {
        Arc::clone(&self.state)
    }

    fn abort_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.abort_task();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_stops_at_zero() {
        let mut state = TimerState::default();
        state.start(Uuid::new_v4(), 2);
        assert!(state.tick());
        assert_eq!(state.seconds_remaining, 1);
        assert!(!state.tick());
        assert_eq!(state, TimerState { generation: 1, ..Default::default() });
        // Further ticks never go negative
        assert!(!state.tick());
        assert_eq!(state.seconds_remaining, 0);
    }

    #[test]
    fn format_is_minutes_and_seconds() {
        assert_eq!(format_countdown(600), "10:00");
        assert_eq!(format_countdown(75), "01:15");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[tokio::test(start_paused = true)]
    async fn counts_down_once_per_tick() {
        let mut countdown = Countdown::new(Duration::from_secs(1));
        let step = Uuid::new_v4();
        countdown.start(step, 5).await;

        tokio::time::sleep(Duration::from_millis(3_500)).await;
        let snap = countdown.snapshot().await;
        assert!(snap.is_running);
        assert_eq!(snap.active_step_id, Some(step));
        assert_eq!(snap.seconds_remaining, 2);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let snap = countdown.snapshot().await;
        assert!(!snap.is_running);
        assert_eq!(snap.seconds_remaining, 0);
        assert!(snap.active_step_id.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_halts_ticks() {
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.stop().await;
        countdown.start(Uuid::new_v4(), 10).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        countdown.stop().await;
        countdown.stop().await;
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert_eq!(countdown.snapshot().await, TimerState { generation: 1, ..Default::default() });
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_countdown() {
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.start(Uuid::new_v4(), 10).await;
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        let second = Uuid::new_v4();
        countdown.start(second, 4).await;
        tokio::time::sleep(Duration::from_millis(1_500)).await;

        let snap = countdown.snapshot().await;
        assert_eq!(snap.active_step_id, Some(second));
        assert_eq!(snap.seconds_remaining, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_aborts_the_task() {
        let mut countdown = Countdown::new(Duration::from_secs(1));
        countdown.start(Uuid::new_v4(), 60).await;
        let state = Arc::clone(&countdown.state);
        drop(countdown);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(state.read().await.seconds_remaining, 60);
        // The only other owner was the aborted task.
        assert_eq!(Arc::strong_count(&state), 1);
    }
}
