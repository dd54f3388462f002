#![cfg(feature = "server")]

mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    response::Response,
};
use common::{PUSH_MAIN, PushAndPipeline};
use http_body_util::BodyExt;
use labhook::{
    Capability, Dispatcher, EventKind,
    server::{ServerConfig, router},
    testing::{CancellingListener, RecordingListener},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn config() -> ServerConfig {
    ServerConfig {
        secret: Some("s3cr3t".to_owned()),
        events: vec![EventKind::Push, EventKind::Pipeline],
        ..ServerConfig::default()
    }
}

fn request(method: Method, event: Option<&str>, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri("/webhook");
    if let Some(event) = event {
        builder = builder.header("X-Gitlab-Event", event);
    }
    if let Some(token) = token {
        builder = builder.header("X-Gitlab-Token", token);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

async fn send(dispatcher: Dispatcher, config: &ServerConfig, request: Request<Body>) -> Response {
    router(Arc::new(dispatcher), config).oneshot(request).await.unwrap()
}

async fn error_code(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["message"].is_string());
    body["error"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn delivered_push_is_no_content() {
    let config = config();
    let recorder = RecordingListener::new("recorder");
    let dispatcher = config.dispatcher_builder().register(recorder.clone()).build();

    let mut req = request(Method::POST, Some("Push Hook"), Some("s3cr3t"), PUSH_MAIN);
    req.headers_mut()
        .insert("X-Gitlab-Event-UUID", "13792a34-cac6-4fda-95a8-c58e00a3954e".parse().unwrap());
    let response = send(dispatcher, &config, req).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let calls = recorder.calls_for(Capability::Push);
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].event_uuid.as_deref(),
        Some("13792a34-cac6-4fda-95a8-c58e00a3954e")
    );
}

#[tokio::test]
async fn pipeline_failures_map_to_statuses() {
    let config = config();
    let cases = [
        (Method::GET, Some("push"), Some("s3cr3t"), PUSH_MAIN, StatusCode::METHOD_NOT_ALLOWED, "invalid_method"),
        (Method::POST, Some("push"), Some("nope"), PUSH_MAIN, StatusCode::UNAUTHORIZED, "authentication_failed"),
        (Method::POST, Some("push"), None, PUSH_MAIN, StatusCode::UNAUTHORIZED, "authentication_failed"),
        (Method::POST, None, Some("s3cr3t"), PUSH_MAIN, StatusCode::BAD_REQUEST, "missing_event_header"),
        (Method::POST, Some("Bogus Hook"), Some("s3cr3t"), PUSH_MAIN, StatusCode::BAD_REQUEST, "unsupported_event_kind"),
        (Method::POST, Some("wiki_page"), Some("s3cr3t"), "{}", StatusCode::BAD_REQUEST, "event_not_subscribed"),
        (Method::POST, Some("push"), Some("s3cr3t"), "not json", StatusCode::BAD_REQUEST, "payload_decode"),
    ];

    for (method, event, token, body, status, code) in cases {
        let dispatcher = config.dispatcher_builder().build();
        let response = send(dispatcher, &config, request(method, event, token, body)).await;
        assert_eq!(response.status(), status, "{code}");
        assert_eq!(error_code(response).await, code);
    }
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let config = ServerConfig {
        body_limit: 8,
        ..config()
    };
    let recorder = RecordingListener::new("recorder");
    let dispatcher = config.dispatcher_builder().register(recorder.clone()).build();

    let response = send(
        dispatcher,
        &config,
        request(Method::POST, Some("push"), Some("s3cr3t"), PUSH_MAIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(error_code(response).await, "body_too_large");
    assert_eq!(recorder.count(), 0);
}

#[tokio::test]
async fn listener_failure_is_internal_error_after_full_fan_out() {
    let config = config();
    let healthy = PushAndPipeline::default();
    let dispatcher = config
        .dispatcher_builder()
        .register(RecordingListener::new("broken").failing("down"))
        .register(healthy.clone())
        .build();

    let response = send(
        dispatcher,
        &config,
        request(Method::POST, Some("push"), Some("s3cr3t"), PUSH_MAIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(response).await, "listener_failed");
    assert_eq!(healthy.pushes(), 1);
}

#[tokio::test]
async fn cancelled_dispatch_is_unavailable() {
    let config = config();
    let dispatcher = config
        .dispatcher_builder()
        .register(CancellingListener::new("stopper"))
        .register(RecordingListener::new("after"))
        .build();

    let response = send(
        dispatcher,
        &config,
        request(Method::POST, Some("push"), Some("s3cr3t"), PUSH_MAIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(error_code(response).await, "dispatch_cancelled");
}

#[tokio::test]
async fn zero_deadline_is_unavailable() {
    let config = ServerConfig {
        deadline_ms: Some(0),
        ..config()
    };
    let dispatcher = config
        .dispatcher_builder()
        .register(RecordingListener::new("recorder"))
        .build();

    let response = send(
        dispatcher,
        &config,
        request(Method::POST, Some("push"), Some("s3cr3t"), PUSH_MAIN),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn configured_path_is_the_only_route() {
    let config = ServerConfig {
        path: "/hooks/gitlab".to_owned(),
        secret: None,
        ..config()
    };

    let mut wrong = request(Method::POST, Some("push"), None, PUSH_MAIN);
    *wrong.uri_mut() = "/webhook".parse().unwrap();
    let response = send(config.dispatcher_builder().build(), &config, wrong).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut right = request(Method::POST, Some("push"), None, PUSH_MAIN);
    *right.uri_mut() = "/hooks/gitlab".parse().unwrap();
    let response = send(config.dispatcher_builder().build(), &config, right).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[test]
fn config_from_lookup_drives_router() {
    let config = ServerConfig::from_lookup(|var| match var {
        "LABHOOK_EVENTS" => Some("Push Hook,pipeline".to_owned()),
        "LABHOOK_SECRET" => Some(String::new()),
        _ => None,
    })
    .unwrap();

    assert!(config.secret.is_none());
    let dispatcher = config.dispatcher_builder().build();
    assert!(dispatcher.subscriptions().contains(EventKind::Push));
    assert!(dispatcher.subscriptions().contains(EventKind::Pipeline));
    assert!(!dispatcher.subscriptions().contains(EventKind::Note));
}
