//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{format_clock, ModeConfig, TimerState};

/// API response structure for intent endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
    pub clock: String,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            clock: format_clock(timer.remaining_seconds),
            timer,
        }
    }

    /// Create a response whose status mirrors the running flag
    pub fn from_timer(message: String, timer: TimerState) -> Self {
        let status = if timer.is_running { "running" } else { "idle" };
        Self::new(status.to_string(), message, timer)
    }

    /// Create a response for an edit that left the clock unchanged
    pub fn discarded(message: String, timer: TimerState) -> Self {
        Self::new("discarded".to_string(), message, timer)
    }
}

/// Request body for POST /increment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncrementRequest {
    pub seconds: i64,
}

/// Request body for POST /edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    pub value: String,
}

/// Status response with the active mode and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub timer: TimerState,
    pub clock: String,
    pub mode: ModeConfig,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
