//! Focus Timer - a countdown timer service with a drag-to-set dial
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting focus-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, session={}min, mute={}, no_audio={}",
          config.host, config.port, config.minutes, config.mute, config.no_audio);

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        config.minutes,
        config.audio(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/toggle      - Start, resume or pause");
    info!("  POST /timer/reset       - Stop and restore the session length");
    info!("  PUT  /session           - Set session length in minutes");
    info!("  POST /session/increase  - One more minute");
    info!("  POST /session/decrease  - One less minute");
    info!("  POST /dial/press|move|release - Drag the dial handle");
    info!("  POST /audio/toggle      - Switch ambient sound on or off");
    info!("  GET  /status            - Timer, dial and audio view");
    info!("  GET  /health            - Health check");

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

    state.shutdown();
    info!("Server shutdown complete");
    Ok(())
}
