//! Pomo Clock - A Pomodoro countdown timer served over a local HTTP interface
//! 
//! This library provides the timer state machine, the engine task that owns
//! it and ticks it once per second, and the HTTP API that forwards user
//! intents to the engine.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{EditError, EngineError};
pub use state::{AppState, Intent, ModeCatalogue, ModeKey, TimerState};
pub use tasks::{EngineHandle, TimerEngine};
pub use utils::signals::shutdown_signal;
