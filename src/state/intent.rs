//! Intents accepted by the timer engine

use super::ModeKey;

/// A user action submitted to the engine.
///
/// Elapsed-time ticks are not intents; only the engine's own schedule
/// produces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Switch to another preset; resets the clock and stops
    SelectMode(ModeKey),
    /// Start when idle, stop when running
    ToggleRun,
    /// Restore the active mode's full duration and stop
    Reset,
    /// Add seconds to the remaining time
    Increment(i64),
    /// Replace the remaining time with a `minutes:seconds` literal
    EditTime(String),
}

impl Intent {
    /// Short name used for logging and last-action tracking
    pub fn name(&self) -> &'static str {
        match self {
            Intent::SelectMode(_) => "select-mode",
            Intent::ToggleRun => "toggle-run",
            Intent::Reset => "reset",
            Intent::Increment(_) => "increment",
            Intent::EditTime(_) => "edit-time",
        }
    }
}
