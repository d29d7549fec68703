//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use super::{Intent, ModeCatalogue, TimerState};
use crate::{error::EngineError, tasks::EngineHandle};

/// Shared state handed to every HTTP handler
#[derive(Debug)]
pub struct AppState {
    /// Client side of the timer engine task
    pub engine: EngineHandle,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState around a running engine
    pub fn new(engine: EngineHandle, port: u16, host: String) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward a user intent to the engine.
    ///
    /// Only intents the engine accepts are recorded as the last action.
    pub async fn dispatch(&self, intent: Intent) -> Result<TimerState, EngineError> {
        debug!("Dispatching {} intent", intent.name());
        let action = intent.name();
        let timer = self.engine.send(intent).await?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(timer)
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> TimerState {
        self.engine.snapshot()
    }

    pub fn catalogue(&self) -> &ModeCatalogue {
        self.engine.catalogue()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
