//! Timer state structure and its transitions

use serde::{Deserialize, Serialize};

use super::{clock::parse_clock, Intent, ModeCatalogue, ModeKey};
use crate::error::EditError;

/// Countdown state: the active mode, the time left and whether it is counting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub active_mode: ModeKey,
    /// Seconds left; may reach zero or go negative through edits and increments
    pub remaining_seconds: i64,
    pub is_running: bool,
}

impl TimerState {
    /// Create an idle timer loaded with the mode's full duration
    pub fn new(mode: ModeKey, catalogue: &ModeCatalogue) -> Self {
        Self {
            active_mode: mode,
            remaining_seconds: catalogue.duration_seconds(mode),
            is_running: false,
        }
    }

    /// Apply a single intent in place.
    ///
    /// Only `EditTime` can fail; on failure the state is left untouched.
    pub fn apply(&mut self, intent: &Intent, catalogue: &ModeCatalogue) -> Result<(), EditError> {
        match intent {
            Intent::SelectMode(mode) => self.select_mode(*mode, catalogue),
            Intent::ToggleRun => self.toggle_run(),
            Intent::Reset => self.reset(catalogue),
            Intent::Increment(delta) => self.increment(*delta),
            Intent::EditTime(text) => return self.edit_time(text),
        }
        Ok(())
    }

    pub fn select_mode(&mut self, mode: ModeKey, catalogue: &ModeCatalogue) {
        self.active_mode = mode;
        self.remaining_seconds = catalogue.duration_seconds(mode);
        self.is_running = false;
    }

    pub fn toggle_run(&mut self) {
        self.is_running = !self.is_running;
    }

    pub fn reset(&mut self, catalogue: &ModeCatalogue) {
        self.remaining_seconds = catalogue.duration_seconds(self.active_mode);
        self.is_running = false;
    }

    pub fn increment(&mut self, delta_seconds: i64) {
        self.remaining_seconds = self.remaining_seconds.saturating_add(delta_seconds);
    }

    /// Replace the remaining time from a `minutes:seconds` literal.
    ///
    /// Refused while running.
    pub fn edit_time(&mut self, text: &str) -> Result<(), EditError> {
        if self.is_running {
            return Err(EditError::Running);
        }
        self.remaining_seconds = parse_clock(text)?;
        Ok(())
    }

    /// Decrement by one second; a no-op unless running with time left
    pub fn tick(&mut self) {
        if self.should_tick() {
            self.remaining_seconds -= 1;
        }
    }

    /// Whether the tick source should be armed for this state
    pub fn should_tick(&self) -> bool {
        self.is_running && self.remaining_seconds > 0
    }
}
