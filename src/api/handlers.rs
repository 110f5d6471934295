//! HTTP endpoint handlers

use std::{num::IntErrorKind, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::state::{AppState, StateError};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, TickResponse};

/// Map a failed timer command onto an HTTP response
fn command_error(state: &AppState, err: StateError) -> Response {
    match err {
        StateError::Rejected(reason) => match state.snapshot() {
            Ok(timer) => {
                warn!("Timer command rejected: {}", reason);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(ApiResponse::rejected(reason.to_string(), timer)),
                )
                    .into_response()
            }
            Err(e) => {
                error!("Failed to read timer state: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        StateError::Poisoned(what) => {
            error!("Timer command failed: could not lock {}", what);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Parse a countdown path segment.
///
/// Integers too wide for `i64` saturate, so they are rejected as out of range
/// like any other bad duration instead of as a malformed request.
fn parse_duration(raw: &str) -> Option<i64> {
    match raw.parse::<i64>() {
        Ok(duration) => Some(duration),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Handle POST /countdown/:duration - Start a countdown
pub async fn countdown_handler(
    State(state): State<Arc<AppState>>,
    Path(raw): Path<String>,
) -> Response {
    let Some(duration) = parse_duration(&raw) else {
        warn!("Countdown endpoint called with non-numeric duration {:?}", raw);
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid countdown duration: {}", raw),
        )
            .into_response();
    };

    match state.configure_countdown(duration) {
        Ok(timer) => {
            info!("Countdown endpoint called - duration {}", duration);
            Json(ApiResponse::new(
                "countdown",
                format!("Countdown set to {}", duration),
                timer,
            ))
            .into_response()
        }
        Err(e) => command_error(&state, e),
    }
}

/// Handle POST /stopwatch - Start the stopwatch
pub async fn stopwatch_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.configure_stopwatch() {
        Ok(timer) => {
            info!("Stopwatch endpoint called");
            Json(ApiResponse::new("stopwatch", "Stopwatch started".to_string(), timer))
                .into_response()
        }
        Err(e) => command_error(&state, e),
    }
}

/// Handle POST /tick - Advance the timer by one polling iteration
pub async fn tick_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TickResponse>, StatusCode> {
    match state.tick() {
        Ok(report) => Ok(Json(report.into())),
        Err(e) => {
            error!("Failed to tick timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /reset - Return the timer to its initial state
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.reset() {
        Ok(timer) => {
            info!("Reset endpoint called");
            Json(ApiResponse::new("disabled", "Timer reset".to_string(), timer)).into_response()
        }
        Err(e) => command_error(&state, e),
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let timer = state.published_snapshot();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer,
        tick_ms: u64::try_from(state.tick_period.as_millis()).unwrap_or(u64::MAX),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
