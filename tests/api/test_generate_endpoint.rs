// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /api/generate and GET /health

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use thumbnail_studio::{
    api::{create_app, AppState, TIMEOUT_MESSAGE},
    geometry::ImageDimensions,
    prediction::PredictionOrchestrator,
};
use tower::util::ServiceExt;

use crate::common::{fast_poll, FakePredictionService, Script, OUTPUT_URL};

const MODEL: &str = "black-forest-labs/flux-schnell";

fn app_with(service: Arc<FakePredictionService>, max_attempts: u32) -> Router {
    let orchestrator = PredictionOrchestrator::new(service, fast_poll(max_attempts));
    create_app(AppState::new(orchestrator, MODEL))
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_generate_returns_output_url_and_snapped_size() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(3)));
    let app = app_with(service.clone(), 60);

    let (status, body) = post_json(
        app,
        "/api/generate",
        json!({"prompt": "a neon city at night", "width": 1280, "height": 720}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], OUTPUT_URL);
    assert_eq!(body["width"], 1024);
    assert_eq!(body["height"], 576);
    assert_eq!(service.polls(), 3);

    assert_eq!(service.last_input("width"), Some(json!(1024)));
    assert_eq!(service.last_input("height"), Some(json!(576)));
    assert_eq!(
        service.last_input("prompt"),
        Some(json!("a neon city at night"))
    );
}

#[tokio::test]
async fn test_generate_defaults_to_thumbnail_size() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let orchestrator = PredictionOrchestrator::new(service.clone(), fast_poll(60));
    let state = AppState::new(orchestrator, MODEL)
        .with_thumbnail_size(ImageDimensions::new(1000, 500));

    let (status, body) = post_json(
        create_app(state),
        "/api/generate",
        json!({"prompt": "mountains"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["width"], 1024);
    assert_eq!(body["height"], 512);
}

#[tokio::test]
async fn test_generate_missing_prompt_is_400() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, body) = post_json(
        app_with(service.clone(), 60),
        "/api/generate",
        json!({"prompt": "   "}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("prompt"));
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_generate_zero_dimension_is_400() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, _) = post_json(
        app_with(service.clone(), 60),
        "/api/generate",
        json!({"prompt": "cat", "width": 0, "height": 512}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_generate_remote_failure_passes_message_through() {
    let service = Arc::new(FakePredictionService::new(Script::FailWith(
        "NSFW content detected".to_string(),
    )));
    let (status, body) = post_json(
        app_with(service, 60),
        "/api/generate",
        json!({"prompt": "cat"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "NSFW content detected");
}

#[tokio::test]
async fn test_generate_timeout_after_poll_bound() {
    let service = Arc::new(FakePredictionService::new(Script::Hang));
    let (status, body) = post_json(
        app_with(service.clone(), 5),
        "/api/generate",
        json!({"prompt": "cat"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], TIMEOUT_MESSAGE);
    assert_eq!(service.polls(), 5);
}

#[tokio::test]
async fn test_health_reports_inpaint_configuration() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app_with(service, 60).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["inpaintConfigured"], false);
    assert!(body["features"]
        .as_array()
        .unwrap()
        .contains(&json!("selection-inpainting")));
}

#[tokio::test]
async fn test_generate_wrong_field_type_is_400_json() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, body) = post_json(
        app_with(service.clone(), 60),
        "/api/generate",
        json!({"prompt": "cat", "width": "wide"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_generate_missing_content_type_is_400_json() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/generate")
        .body(Body::from(r#"{"prompt": "cat"}"#))
        .unwrap();

    let response = app_with(service, 60).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["details"].as_str().unwrap().contains("Content-Type"));
}
