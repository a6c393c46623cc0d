//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::{
    dial::Point,
    services::{AMBIENT_LAYERS, MASTER_GAIN},
    state::{AppState, Outcome},
};
use super::responses::{
    self, ApiResponse, AudioResponse, DialView, HealthResponse, StatusResponse, TimerView,
};

/// Body of PUT /session
#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub minutes: i64,
}

/// Body of the dial pointer endpoints, in view-box units
#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    pub x: f64,
    pub y: f64,
}

/// Turn an intent outcome into a response, logging failures
fn respond(
    endpoint: &str,
    result: Result<Outcome, String>,
    accepted_message: &str,
    ignored_message: &str,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(outcome) if outcome.accepted => {
            info!("{} endpoint called - {}", endpoint, accepted_message);
            Ok(Json(ApiResponse::for_timer(accepted_message.to_string(), &outcome.timer)))
        }
        Ok(outcome) => Ok(Json(ApiResponse::ignored(ignored_message.to_string(), &outcome.timer))),
        Err(e) => {
            error!("{} failed: {}", endpoint, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/toggle - Start, resume or pause
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle() {
        Ok(outcome) => {
            let message = if outcome.timer.is_running() { "Timer running" } else { "Timer paused" };
            info!("Toggle endpoint called - {}", message);
            Ok(Json(ApiResponse::for_timer(message.to_string(), &outcome.timer)))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("Start", state.start(), "Timer running", "Timer already running")
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("Pause", state.pause(), "Timer paused", "Timer is not running")
}

/// Handle POST /timer/reset - Stop and restore the full session
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("Reset", state.reset(), "Timer reset", "Timer reset")
}

/// Handle POST /session/increase
pub async fn increase_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        "Increase",
        state.adjust_minutes(1),
        "Session length increased",
        "Session length is locked while the timer is active",
    )
}

/// Handle POST /session/decrease
pub async fn decrease_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        "Decrease",
        state.adjust_minutes(-1),
        "Session length decreased",
        "Session length is locked while the timer is active",
    )
}

/// Handle PUT /session - Set the session length, clamped to 1..=60 minutes
pub async fn set_session_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SessionRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        "Set session",
        state.set_session_minutes(request.minutes),
        "Session length updated",
        "Session length is locked while the timer is active",
    )
}

/// Handle POST /dial/press - Begin dragging the handle
pub async fn dial_press_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    respond(
        "Dial press",
        state.press_dial(Point::new(request.x, request.y)),
        "Dragging session length",
        "Press did not start a drag",
    )
}

/// Handle POST /dial/move - Continue dragging the handle
pub async fn dial_move_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PointerRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.move_dial(Point::new(request.x, request.y)) {
        // Moves are frequent, keep them out of the info log
        Ok(outcome) if outcome.accepted => Ok(Json(ApiResponse::for_timer(
            "Session length updated".to_string(),
            &outcome.timer,
        ))),
        Ok(outcome) => Ok(Json(ApiResponse::ignored("No drag in progress".to_string(), &outcome.timer))),
        Err(e) => {
            error!("Dial move failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /dial/release - End the drag
pub async fn dial_release_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    respond("Dial release", state.release_dial(), "Drag finished", "No drag in progress")
}

/// Handle POST /audio/toggle - Enable or disable ambient sound
pub async fn audio_toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<AudioResponse>, StatusCode> {
    match state.toggle_audio() {
        Ok(audio) => {
            info!("Audio toggle endpoint called - {}", audio.status);
            Ok(Json(AudioResponse {
                audio,
                master_gain: MASTER_GAIN,
                layers: AMBIENT_LAYERS.to_vec(),
            }))
        }
        Err(e) => {
            error!("Failed to toggle audio: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /audio - Audio status and ambient sound recipe
pub async fn audio_handler(State(state): State<Arc<AppState>>) -> Result<Json<AudioResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get audio status: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(AudioResponse {
        audio: snapshot.audio,
        master_gain: MASTER_GAIN,
        layers: AMBIENT_LAYERS.to_vec(),
    }))
}

/// Handle GET /status - Return everything needed to render the timer
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let snapshot = match state.snapshot() {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let timer = &snapshot.timer;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        greeting: responses::greeting().to_string(),
        status_text: responses::status_text(timer).to_string(),
        session_info: responses::session_info(timer),
        session_length: responses::session_length(timer),
        timer: TimerView::from(timer),
        dial: DialView::new(&state.geometry(), timer, snapshot.dragging),
        audio: snapshot.audio,
        last_notification: snapshot.last_notification,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
