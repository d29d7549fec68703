//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/mode/:mode", post(select_mode_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        .route("/increment", post(increment_handler))
        .route("/edit", post(edit_handler))
        .route("/status", get(status_handler))
        .route("/modes", get(modes_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
