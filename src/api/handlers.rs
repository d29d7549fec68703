//! HTTP endpoint handlers

use std::{convert::Infallible, future, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error, info, warn};

use crate::{
    error::{EditError, EngineError},
    state::{format_clock, AppState, Intent, ModeConfig, ModeKey, TimerState},
};
use super::responses::{ApiResponse, EditRequest, HealthResponse, IncrementRequest, StatusResponse};

/// Turn an engine reply into a JSON response
fn engine_reply(
    action: &str,
    result: Result<TimerState, EngineError>,
    message: impl FnOnce(&TimerState) -> String,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(timer) => {
            let message = message(&timer);
            Ok(Json(ApiResponse::from_timer(message, timer)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /mode/:mode - Switch to a timer preset
pub async fn select_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let mode: ModeKey = mode.parse().map_err(|e| {
        warn!("{}", e);
        StatusCode::NOT_FOUND
    })?;

    let label = state.catalogue().get(mode).label.clone();
    let result = state.dispatch(Intent::SelectMode(mode)).await;
    engine_reply("select-mode", result, |_| format!("Switched to {}", label))
}

/// Handle POST /toggle - Start or stop the countdown
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.dispatch(Intent::ToggleRun).await;
    engine_reply("toggle-run", result, |timer| {
        if timer.is_running {
            "Timer started".to_string()
        } else {
            "Timer stopped".to_string()
        }
    })
}

/// Handle POST /reset - Restore the active mode's duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.dispatch(Intent::Reset).await;
    engine_reply("reset", result, |timer| {
        format!("Timer reset to {}", format_clock(timer.remaining_seconds))
    })
}

/// Handle POST /increment - Add seconds to the remaining time
pub async fn increment_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IncrementRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.dispatch(Intent::Increment(request.seconds)).await;
    engine_reply("increment", result, |_| format!("Added {} seconds", request.seconds))
}

/// Handle POST /edit - Replace the remaining time while idle
pub async fn edit_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EditRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.dispatch(Intent::EditTime(request.value)).await {
        Ok(timer) => {
            info!("Edit endpoint called - time set to {}", format_clock(timer.remaining_seconds));
            Ok(Json(ApiResponse::from_timer("Time updated".to_string(), timer)))
        }
        Err(EngineError::Edit(EditError::Malformed { input })) => {
            debug!("Ignoring malformed edit {:?}", input);
            Ok(Json(ApiResponse::discarded(
                "Edit discarded".to_string(),
                state.get_timer_state(),
            )))
        }
        Err(EngineError::Edit(EditError::Running)) => {
            warn!("Edit rejected while the timer is running");
            Err(StatusCode::CONFLICT)
        }
        Err(e) => {
            error!("Failed to apply edit-time: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.get_timer_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        clock: format_clock(timer.remaining_seconds),
        mode: state.catalogue().get(timer.active_mode).clone(),
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /modes - Return the mode presets
pub async fn modes_handler(State(state): State<Arc<AppState>>) -> Json<Vec<ModeConfig>> {
    Json(state.catalogue().iter().cloned().collect())
}

/// Handle GET /events - Stream a snapshot after every intent and tick
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.engine.subscribe();
    let initial = rx.borrow_and_update().clone();

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let timer = rx.borrow_and_update().clone();
        Some((timer, rx))
    });

    let events = stream::once(future::ready(initial))
        .chain(updates)
        .map(|timer| Ok(timer_event(&timer)));

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn timer_event(timer: &TimerState) -> Event {
    Event::default().event("timer").json_data(timer).unwrap_or_else(|e| {
        error!("Failed to encode timer event: {}", e);
        Event::default().event("error")
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
