use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wod_timer::{create_router, AppState, TimerConfiguration};

fn create_test_app(default_config: TimerConfiguration) -> Router {
    let state = AppState::new(
        0,
        "127.0.0.1".to_string(),
        default_config,
        Duration::from_secs(1),
    )
    .unwrap();
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header("content-type", "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_status_starts_with_default_countdown() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(&app, "GET", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timer"]["phase"], "configured");
    assert_eq!(json["timer"]["clock"], "03:00");
    assert_eq!(json["timer"]["config"]["mode"], "Countdown");
    assert_eq!(json["timer"]["config"]["total_duration"], 180);
    assert_eq!(json["clock_running"], false);
}

#[tokio::test]
async fn test_settings_configure_emom() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(
        &app,
        "PUT",
        "/timer/settings",
        Some(json!({ "mode": "EMOM", "rounds": 12 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "configured");
    assert_eq!(json["timer"]["config"]["mode"], "EMOM");
    assert_eq!(json["timer"]["config"]["round_count"], 12);
    assert_eq!(json["timer"]["config"]["work_seconds"], 50);
    assert_eq!(json["timer"]["config"]["rest_seconds"], 10);
    assert_eq!(json["timer"]["clock"], "12:00");
    assert_eq!(json["timer"]["label"], "WORK");
}

#[tokio::test]
async fn test_invalid_settings_are_rejected() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(
        &app,
        "PUT",
        "/timer/settings",
        Some(json!({ "mode": "Tabata", "rounds": 0 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], "error");
    assert_eq!(json["message"], "round count must be positive (got 0)");

    let (_, json) = send(&app, "GET", "/timer", None).await;
    assert_eq!(json["timer"]["config"]["mode"], "Countdown");
}

#[tokio::test]
async fn test_lifecycle_violations_conflict() {
    let app = create_test_app(TimerConfiguration::countdown(180));

    let (status, _) = send(&app, "POST", "/timer/pause", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "running");

    let (status, json) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "timer is already running");

    let (status, _) = send(&app, "POST", "/timer/finish", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_workout_is_not_found() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(&app, "POST", "/workouts/nope/timer", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "unknown workout: nope");
}

#[tokio::test]
async fn test_workouts_are_listed() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    let (status, json) = send(&app, "GET", "/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    let workouts = json.as_array().unwrap();
    assert_eq!(workouts.len(), 3);
    assert_eq!(workouts[0]["name"], "Cindy");
    assert_eq!(workouts[0]["type"], "AMRAP");
}

#[tokio::test]
async fn test_free_standing_timer_cannot_be_logged() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    send(&app, "POST", "/timer/start", None).await;
    send(&app, "POST", "/timer/pause", None).await;

    let (status, json) = send(&app, "POST", "/timer/finish", Some(json!({ "feeling": 6 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "session has no linked workout");

    let (status, json) = send(&app, "DELETE", "/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timer"]["phase"], "configured");
    assert_eq!(json["timer"]["clock"], "03:00");
}

#[tokio::test(start_paused = true)]
async fn test_workout_session_completes_and_is_logged() {
    let app = create_test_app(TimerConfiguration::countdown(180));

    let (status, json) = send(&app, "POST", "/workouts/wod3/timer", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timer"]["config"]["mode"], "AMRAP");
    assert_eq!(json["timer"]["clock"], "03:00");
    assert_eq!(json["timer"]["label"], "AMRAP");
    assert_eq!(json["timer"]["workout"]["name"], "Fight Gone Bad");

    send(&app, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(180_500)).await;

    let (_, json) = send(&app, "GET", "/timer", None).await;
    assert_eq!(json["timer"]["phase"], "completed");
    assert_eq!(json["timer"]["label"], "Completed!");
    assert_eq!(json["timer"]["state"]["elapsed_or_remaining"], 0);
    assert_eq!(json["timer"]["state"]["is_completed"], true);
    assert_eq!(json["timer"]["state"]["is_running"], false);

    let (status, json) = send(
        &app,
        "POST",
        "/timer/finish",
        Some(json!({ "notes": "Scaled box jumps", "feeling": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "feeling must be between 1 and 10 (got 11)");

    let (status, json) = send(
        &app,
        "POST",
        "/timer/finish",
        Some(json!({ "notes": "Scaled box jumps" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["workout_id"], "wod3");
    assert_eq!(json["duration_seconds"], 180);
    assert_eq!(json["feeling"], 7);
    assert_eq!(json["notes"], "Scaled box jumps");
    assert_eq!(json["exercise_results"], json!([]));

    let (_, json) = send(&app, "GET", "/diary", None).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["workout_id"], "wod3");
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_ticks_restores_initial_state() {
    let app = create_test_app(TimerConfiguration::countdown(180));
    send(&app, "PUT", "/timer/settings", Some(json!({ "mode": "Tabata" }))).await;
    send(&app, "POST", "/timer/start", None).await;
    tokio::time::sleep(Duration::from_millis(52_500)).await;

    let (_, json) = send(&app, "GET", "/timer", None).await;
    assert_eq!(json["timer"]["state"]["current_round"], 2);
    assert_eq!(json["timer"]["state"]["is_resting"], true);
    assert_eq!(json["timer"]["label"], "REST");

    let (status, json) = send(&app, "POST", "/timer/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["timer"]["state"]["elapsed_or_remaining"], 240);
    assert_eq!(json["timer"]["state"]["current_round"], 1);
    assert_eq!(json["timer"]["state"]["is_resting"], false);
    assert_eq!(json["timer"]["state"]["is_completed"], false);
}
