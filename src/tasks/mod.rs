//! Background tasks module
//! 
//! This module contains the timer engine task that runs alongside the HTTP server.

pub mod tick_scheduler;
pub mod timer_engine;

// Re-export main types
pub use tick_scheduler::{TickScheduler, TICK_PERIOD};
pub use timer_engine::{EngineCommand, EngineHandle, TimerEngine};
