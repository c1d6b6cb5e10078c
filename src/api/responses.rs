//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::recorder::DEFAULT_FEELING,
    state::{SessionError, StateError, TimerSnapshot},
};

/// API response structure for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    /// Create a new timer response; status mirrors the session phase
    pub fn new(message: impl Into<String>, timer: TimerSnapshot) -> Self {
        let status = serde_json::to_value(timer.phase)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            status,
            message: message.into(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub clock_running: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Body of POST /timer/finish
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinishRequest {
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default = "default_feeling")]
    pub feeling: u8,
}

fn default_feeling() -> u8 {
    DEFAULT_FEELING
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Handler error carrying the HTTP status it maps to
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl From<StateError> for ApiError {
    fn from(err: StateError) -> Self {
        let status = match &err {
            StateError::UnknownWorkout(_) => StatusCode::NOT_FOUND,
            StateError::Poisoned(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StateError::Session(SessionError::Config(_) | SessionError::Record(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            StateError::Session(_) => StatusCode::CONFLICT,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.message,
            timestamp: Utc::now(),
        };
        (self.status, Json(body)).into_response()
    }
}
