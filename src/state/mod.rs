//! State management module
//! 
//! This module contains the timer state machine, the mode presets and the
//! shared application state handed to the HTTP layer.

pub mod app_state;
pub mod clock;
pub mod intent;
pub mod mode;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use clock::{format_clock, parse_clock};
pub use intent::Intent;
pub use mode::{ModeCatalogue, ModeConfig, ModeKey};
pub use timer_state::TimerState;
