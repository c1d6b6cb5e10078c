//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{
    services::recorder::WorkoutLogRecord,
    state::AppState,
    timer::TimerSettings,
    workouts::Workout,
};
use super::responses::{ApiError, FinishRequest, HealthResponse, StatusResponse, TimerResponse};

fn rejected(action: &str, err: impl Into<ApiError>) -> ApiError {
    let err = err.into();
    warn!("{} rejected: {}", action, err.message);
    err
}

/// Handle GET /timer - Current timer snapshot
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let timer = state.get_timer_snapshot()?;
    let clock_running = state.clock.lock().map(|clock| clock.is_running()).unwrap_or(false);
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        clock_running,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle PUT /timer/settings - Configure a free-standing timer
pub async fn settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<TimerSettings>,
) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state
        .configure_timer(&settings)
        .map_err(|e| rejected("Timer settings", e))?;
    info!("Timer configured as {}", settings.mode);
    Ok(Json(TimerResponse::new(format!("{} timer configured", settings.mode), timer)))
}

/// Handle POST /workouts/:workout_id/timer - Configure the timer for a workout
pub async fn workout_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state
        .configure_from_workout(&workout_id)
        .map_err(|e| rejected("Workout timer", e))?;
    Ok(Json(TimerResponse::new(format!("Timer configured for workout {}", workout_id), timer)))
}

/// Handle POST /timer/start - Start or resume the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state.start_timer().map_err(|e| rejected("Start", e))?;
    Ok(Json(TimerResponse::new("Timer running", timer)))
}

/// Handle POST /timer/pause - Pause without resetting
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state.pause_timer().map_err(|e| rejected("Pause", e))?;
    Ok(Json(TimerResponse::new("Timer paused", timer)))
}

/// Handle POST /timer/reset - Back to the initial values
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state.reset_timer().map_err(|e| rejected("Reset", e))?;
    Ok(Json(TimerResponse::new("Timer reset", timer)))
}

/// Handle DELETE /timer - Leave without recording
pub async fn discard_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, ApiError> {
    let timer = state.discard_session().map_err(|e| rejected("Discard", e))?;
    Ok(Json(TimerResponse::new("Timer session discarded", timer)))
}

/// Handle POST /timer/finish - Log the session to the diary
pub async fn finish_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FinishRequest>,
) -> Result<(StatusCode, Json<WorkoutLogRecord>), ApiError> {
    let record = state
        .finish_session(request.notes, request.feeling)
        .map_err(|e| rejected("Finish", e))?;
    info!("Session logged as {}", record.id);
    Ok((StatusCode::CREATED, Json(record)))
}

/// Handle GET /workouts - Workouts the timer can be started from
pub async fn workouts_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Workout>> {
    Json(state.get_workouts().to_vec())
}

/// Handle GET /diary - Recorded sessions
pub async fn diary_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<WorkoutLogRecord>>, ApiError> {
    Ok(Json(state.get_diary()?))
}

/// Handle GET /health - Health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
