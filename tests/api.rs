//! HTTP API tests driven through the router without binding a socket.

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use soft_timer::{create_router, AppState, Profile};

fn app(profile: Profile) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        profile,
        Duration::ZERO,
    ));
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else if is_json {
        serde_json::from_slice(&bytes).unwrap()
    } else {
        // Extractor rejections come back as plain text
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    };
    (status, body)
}

#[tokio::test]
async fn countdown_runs_to_interrupt() {
    let (app, state) = app(Profile::Standard);
    let mut interrupts = state.subscribe_interrupts();

    let (status, body) = send(&app, "POST", "/countdown/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "countdown");
    assert_eq!(body["timer"]["value"], 2);
    assert_eq!(body["timer"]["mode"], "countdown");
    assert_eq!(body["timer"]["enabled"], true);

    let (_, body) = send(&app, "POST", "/tick").await;
    assert_eq!(body["step"], "applied");
    assert_eq!(body["interrupt_fired"], false);

    let (_, body) = send(&app, "POST", "/tick").await;
    assert_eq!(body["interrupt_fired"], true);
    assert_eq!(body["timer"]["interrupt_flag"], true);
    assert_eq!(body["timer"]["mode"], "disabled");
    assert_eq!(body["timer"]["enabled"], false);

    let event = interrupts.try_recv().unwrap();
    assert_eq!(event.snapshot.value, 0);

    let (_, body) = send(&app, "POST", "/tick").await;
    assert_eq!(body["step"], "ignored");
    assert_eq!(body["interrupt_fired"], false);
}

#[tokio::test]
async fn out_of_range_countdown_is_rejected() {
    let (app, _) = app(Profile::Compact);

    send(&app, "POST", "/stopwatch").await;
    send(&app, "POST", "/tick").await;

    for uri in ["/countdown/0", "/countdown/11", "/countdown/-4"] {
        let (status, body) = send(&app, "POST", uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["timer"]["mode"], "stopwatch");
        assert_eq!(body["timer"]["value"], 1);
    }

    let (status, body) = send(&app, "POST", "/countdown/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_string());
}

#[tokio::test]
async fn oversized_countdown_is_rejected_not_malformed() {
    let (app, _) = app(Profile::Standard);

    for uri in ["/countdown/99999999999999999999", "/countdown/-99999999999999999999"] {
        let (status, body) = send(&app, "POST", uri).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(body["status"], "rejected");
        assert_eq!(body["timer"]["mode"], "disabled");
        assert_eq!(body["timer"]["value"], 0);
    }
}

#[tokio::test]
async fn stopwatch_saturates_and_reset_clears() {
    let (app, _) = app(Profile::Compact);

    let (status, body) = send(&app, "POST", "/stopwatch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["mode"], "stopwatch");

    for _ in 0..15 {
        send(&app, "POST", "/tick").await;
    }
    let (_, body) = send(&app, "POST", "/tick").await;
    assert_eq!(body["step"], "saturated");
    assert_eq!(body["timer"]["value"], 10);
    assert_eq!(body["timer"]["interrupt_flag"], false);

    let (status, body) = send(&app, "POST", "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["value"], 0);
    assert_eq!(body["timer"]["mode"], "disabled");
    assert_eq!(body["timer"]["enabled"], false);
}

#[tokio::test]
async fn status_reports_last_action() {
    let (app, _) = app(Profile::Standard);

    let (status, body) = send(&app, "GET", "/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_action"], Value::Null);
    assert_eq!(body["timer"]["max_duration"], 255);
    assert_eq!(body["tick_ms"], 0);
    assert_eq!(body["port"], 20554);

    send(&app, "POST", "/countdown/9").await;
    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["last_action"], "countdown");
    assert_eq!(body["timer"]["value"], 9);
}

#[tokio::test]
async fn health_check() {
    let (app, _) = app(Profile::Standard);
    let (status, body) = send(&app, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn tick_task_drives_countdown() {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        Profile::Compact,
        Duration::from_millis(5),
    ));
    let mut interrupts = state.subscribe_interrupts();
    state.configure_countdown(3).unwrap();

    let task = tokio::spawn(soft_timer::tasks::timer_tick_task(Arc::clone(&state)));
    let event = tokio::time::timeout(Duration::from_secs(2), interrupts.recv())
        .await
        .expect("interrupt within timeout")
        .unwrap();
    task.abort();

    assert!(event.snapshot.interrupt_flag);
    assert!(!state.snapshot().unwrap().enabled);
}
