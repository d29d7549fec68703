//! Error types for the timer engine

use thiserror::Error;

/// Reasons an edit-time intent leaves the clock untouched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Malformed time literal: {input:?}")]
    Malformed { input: String },

    #[error("Time cannot be edited while the timer is running")]
    Running,
}

/// Errors returned to callers of the engine handle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("Timer engine is no longer running")]
    Closed,
}
