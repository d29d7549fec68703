//! Pomo Clock - A Pomodoro countdown timer served over a local HTTP interface
//! 
//! This is the main entry point for the pomo-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomo_clock::{
    api::create_router,
    config::Config,
    state::{format_clock, AppState},
    tasks::TimerEngine,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomo_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomo-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, mode={}",
          config.host, config.port, config.mode);

    let catalogue = Arc::new(config.catalogue());
    for mode in catalogue.iter() {
        info!("  {:<12} {} ({})", mode.label, format_clock(mode.duration_seconds()), mode.accent_color);
    }

    // Start the timer engine task
    let engine = TimerEngine::spawn(catalogue, config.mode);

    // Create application state and HTTP router
    let state = Arc::new(AppState::new(engine, config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /mode/:mode - Select pomodoro, shortBreak or longBreak");
    info!("  POST /toggle     - Start or stop the countdown");
    info!("  POST /reset      - Restore the active mode's duration");
    info!("  POST /increment  - Add seconds ({{\"seconds\": 60}})");
    info!("  POST /edit       - Set the time while stopped ({{\"value\": \"5:30\"}})");
    info!("  GET  /status     - Current timer and server status");
    info!("  GET  /modes      - Mode presets");
    info!("  GET  /events     - Server-sent timer snapshots");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
