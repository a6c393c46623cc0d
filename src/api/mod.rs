//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/toggle", post(toggle_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/session", put(set_session_handler))
        .route("/session/increase", post(increase_handler))
        .route("/session/decrease", post(decrease_handler))
        .route("/dial/press", post(dial_press_handler))
        .route("/dial/move", post(dial_move_handler))
        .route("/dial/release", post(dial_release_handler))
        .route("/audio", get(audio_handler))
        .route("/audio/toggle", post(audio_toggle_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
