//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::{
    state::{AppState, TimerSnapshot},
    timer::SetDurationOutcome,
};
use super::responses::{ActionResponse, DurationRequest, DurationResponse, HealthResponse, StatusResponse};

/// Handle GET /timer - Return the render state
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerSnapshot> {
    Json(state.get_timer_state())
}

/// Handle POST /timer/duration - Forward the raw duration input
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> Result<(StatusCode, Json<DurationResponse>), StatusCode> {
    match state.set_duration(request.input).await {
        Ok((SetDurationOutcome::Accepted { duration }, timer)) => {
            Ok((StatusCode::OK, Json(DurationResponse::accepted(duration, timer))))
        }
        Ok((SetDurationOutcome::Rejected(reason), timer)) => {
            warn!("Duration rejected: {}", reason);
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(DurationResponse::rejected(reason, timer)),
            ))
        }
        Err(e) => {
            error!("Failed to set duration: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    match state.start().await {
        Ok((applied, timer)) => Ok(Json(ActionResponse::new("start", applied, timer))),
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    match state.pause().await {
        Ok((applied, timer)) => Ok(Json(ActionResponse::new("pause", applied, timer))),
        Err(e) => {
            error!("Failed to pause timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle POST /timer/reset - Reset to the configured duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ActionResponse>, StatusCode> {
    match state.reset().await {
        Ok(timer) => Ok(Json(ActionResponse::unconditional("reset", timer))),
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}

/// Handle GET /status - Return timer state plus server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Json<HealthResponse>, StatusCode> {
    if state.is_mounted() {
        Ok(Json(HealthResponse::ok()))
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}
