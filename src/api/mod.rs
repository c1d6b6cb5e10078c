//! HTTP API module
//! 
//! This module contains the endpoints UI collaborators use to drive the timer.

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
        .route("/timer", get(status_handler).delete(discard_handler))
        .route("/timer/settings", put(settings_handler))
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timer/finish", post(finish_handler))
        .route("/workouts", get(workouts_handler))
        .route("/workouts/:workout_id/timer", post(workout_timer_handler))
        .route("/diary", get(diary_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
