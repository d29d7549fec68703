//! One-second tick deadline owned by the engine loop

use std::{future, time::Duration};
use tokio::time::{sleep_until, Instant};

use crate::state::TimerState;

/// Interval between ticks while the timer runs
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Holds at most one armed tick deadline.
///
/// The period restarts whenever the running flag or the remaining time
/// changes, and the deadline is dropped as soon as the state stops
/// qualifying for ticks. `sync` measures the new period from the `now` it is
/// given: intents pass the current time, so an increment or edit pushes the
/// next tick a full second out, while ticks pass the deadline that fired so
/// the countdown does not drift.
#[derive(Debug)]
pub struct TickScheduler {
    period: Duration,
    deadline: Option<Instant>,
}

impl TickScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Re-evaluate the deadline after a transition from `before` to `after`
    pub fn sync(&mut self, before: &TimerState, after: &TimerState, now: Instant) {
        if !after.should_tick() {
            self.cancel();
            return;
        }

        let changed = !before.is_running || before.remaining_seconds != after.remaining_seconds;

        if changed || self.deadline.is_none() {
            self.deadline = Some(now + self.period);
        }
    }

    /// Resolves when the armed deadline passes; never resolves while disarmed
    pub async fn expired(&self) {
        match self.deadline {
            Some(deadline) => sleep_until(deadline).await,
            None => future::pending::<()>().await,
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::ModeKey;

    fn state(remaining_seconds: i64, is_running: bool) -> TimerState {
        TimerState {
            active_mode: ModeKey::Pomodoro,
            remaining_seconds,
            is_running,
        }
    }

    #[test]
    fn arms_when_entering_running() {
        let mut scheduler = TickScheduler::default();
        let now = Instant::now();

        scheduler.sync(&state(60, false), &state(60, true), now);
        assert_eq!(scheduler.deadline(), Some(now + TICK_PERIOD));
    }

    #[test]
    fn stays_disarmed_when_running_without_time() {
        let mut scheduler = TickScheduler::default();
        scheduler.sync(&state(0, false), &state(0, true), Instant::now());
        assert!(!scheduler.is_armed());

        scheduler.sync(&state(-5, false), &state(-5, true), Instant::now());
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn cancels_when_stopping() {
        let mut scheduler = TickScheduler::default();
        scheduler.sync(&state(60, false), &state(60, true), Instant::now());
        scheduler.sync(&state(60, true), &state(60, false), Instant::now());
        assert!(!scheduler.is_armed());
    }

    #[test]
    fn restarts_period_when_remaining_changes() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.sync(&state(60, false), &state(60, true), start);

        let later = start + Duration::from_millis(700);
        scheduler.sync(&state(60, true), &state(90, true), later);
        assert_eq!(scheduler.deadline(), Some(later + TICK_PERIOD));
    }

    #[test]
    fn keeps_deadline_when_nothing_relevant_changed() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.sync(&state(60, false), &state(60, true), start);

        let later = start + Duration::from_millis(400);
        scheduler.sync(&state(60, true), &state(60, true), later);
        assert_eq!(scheduler.deadline(), Some(start + TICK_PERIOD));
    }

    #[test]
    fn tick_anchored_sync_keeps_cadence() {
        let mut scheduler = TickScheduler::default();
        let start = Instant::now();
        scheduler.sync(&state(60, false), &state(60, true), start);

        let fired = start + TICK_PERIOD;
        scheduler.sync(&state(60, true), &state(59, true), fired);
        assert_eq!(scheduler.deadline(), Some(start + TICK_PERIOD * 2));
    }

    #[test]
    fn cancels_when_reaching_zero() {
        let mut scheduler = TickScheduler::default();
        scheduler.sync(&state(1, false), &state(1, true), Instant::now());
        scheduler.sync(&state(1, true), &state(0, true), Instant::now());
        assert!(!scheduler.is_armed());
    }
}
