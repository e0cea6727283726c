// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for POST /api/edit

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use thumbnail_studio::{
    api::{create_app, AppState},
    prediction::PredictionOrchestrator,
    session::SessionRegistry,
};
use tokio::sync::Notify;
use tower::util::ServiceExt;

use crate::common::{
    decode_gray, fast_poll, gray_data_uri, noise_data_uri, rgb_data_uri, FakePredictionService,
    Script, OUTPUT_URL,
};

const INPAINT_MODEL: &str = "95b7223104132402a9ae91cc677285bc5eb997834bd2349fa486f53910fd68b3";

fn state_with(service: Arc<FakePredictionService>) -> AppState {
    let orchestrator = PredictionOrchestrator::new(service, fast_poll(60));
    AppState::new(orchestrator, "black-forest-labs/flux-schnell").with_inpaint_model(INPAINT_MODEL)
}

fn edit_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/edit")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn post_edit(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app.oneshot(edit_request(&body)).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_edit_projects_selection_to_true_pixels() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(2)));
    let app = create_app(state_with(service.clone()));

    // 200x100 image shown at 100x50: every display pixel is 2 true pixels
    let (status, body) = post_edit(
        app,
        json!({
            "prompt": "add a red hat",
            "image": rgb_data_uri(200, 100),
            "selection": {"x": 10, "y": 5, "width": 20, "height": 10},
            "displaySize": {"width": 100, "height": 50},
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["imageUrl"], OUTPUT_URL);

    let created = service.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].version, INPAINT_MODEL);

    let mask_uri = service.last_input("mask").unwrap();
    let mask = decode_gray(mask_uri.as_str().unwrap());
    assert_eq!(mask.dimensions(), (200, 100));
    assert_eq!(mask.get_pixel(20, 10).0[0], 255);
    assert_eq!(mask.get_pixel(59, 29).0[0], 255);
    assert_eq!(mask.get_pixel(60, 30).0[0], 0);
    assert_eq!(mask.get_pixel(19, 10).0[0], 0);
    assert_eq!(service.last_input("width"), Some(json!(200)));
    assert_eq!(service.last_input("height"), Some(json!(100)));
}

#[tokio::test]
async fn test_edit_accepts_matching_mask() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let mask = gray_data_uri(64, 32);

    let (status, _) = post_edit(
        create_app(state_with(service.clone())),
        json!({"prompt": "sky", "image": rgb_data_uri(64, 32), "mask": mask}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(service.last_input("mask"), Some(json!(mask)));
}

#[tokio::test]
async fn test_edit_rejects_mask_size_mismatch() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, body) = post_edit(
        create_app(state_with(service.clone())),
        json!({"prompt": "sky", "image": rgb_data_uri(64, 32), "mask": gray_data_uri(32, 32)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("64x32"));
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_edit_missing_mask_is_400() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, body) = post_edit(
        create_app(state_with(service)),
        json!({"prompt": "sky", "image": rgb_data_uri(8, 8)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("mask"));
}

#[tokio::test]
async fn test_edit_selection_outside_image_is_400() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, _) = post_edit(
        create_app(state_with(service.clone())),
        json!({
            "prompt": "sky",
            "image": rgb_data_uri(100, 100),
            "selection": {"x": 150, "y": 150, "width": 20, "height": 20},
            "displaySize": {"width": 100, "height": 100},
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_edit_without_inpaint_model_is_503() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let orchestrator = PredictionOrchestrator::new(service, fast_poll(60));
    let state = AppState::new(orchestrator, "black-forest-labs/flux-schnell");

    let (status, _) = post_edit(
        create_app(state),
        json!({"prompt": "sky", "image": rgb_data_uri(8, 8), "mask": gray_data_uri(8, 8)}),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_edit_rejects_non_image_payload() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, _) = post_edit(
        create_app(state_with(service)),
        json!({"prompt": "sky", "image": "data:text/plain;base64,aGVsbG8=", "mask": gray_data_uri(8, 8)}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_edit_for_same_session_is_409() {
    let gate = Arc::new(Notify::new());
    let service = Arc::new(FakePredictionService::gated(
        Script::SucceedAfter(1),
        gate.clone(),
    ));
    let state = state_with(service);
    let sessions: SessionRegistry = state.sessions.clone();
    let app = create_app(state);

    let body = json!({
        "prompt": "sky",
        "image": rgb_data_uri(8, 8),
        "mask": gray_data_uri(8, 8),
        "sessionId": "editor-1",
    });

    let first = tokio::spawn({
        let app = app.clone();
        let request = edit_request(&body);
        async move { app.oneshot(request).await.unwrap().status() }
    });

    while !sessions.is_in_flight("editor-1") {
        tokio::task::yield_now().await;
    }

    let (status, _) = post_edit(app.clone(), body.clone()).await;
    assert_eq!(status, StatusCode::CONFLICT);

    gate.notify_one();
    assert_eq!(first.await.unwrap(), StatusCode::OK);
    assert!(!sessions.is_in_flight("editor-1"));

    // The slot is free again once the first edit completes
    gate.notify_one();
    let (status, _) = post_edit(app, body).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_edit_accepts_full_size_image_above_default_body_limit() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let body = json!({
        "prompt": "replace the sky",
        "image": noise_data_uri(1024, 1024),
        "mask": gray_data_uri(1024, 1024),
    });
    assert!(body.to_string().len() > 2 * 1024 * 1024);

    let (status, response) = post_edit(create_app(state_with(service.clone())), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["imageUrl"], OUTPUT_URL);
    assert_eq!(service.last_input("width"), Some(json!(1024)));
}

#[tokio::test]
async fn test_edit_malformed_json_has_error_body() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let (status, body) = post_edit(
        create_app(state_with(service.clone())),
        json!({"prompt": "sky", "image": rgb_data_uri(8, 8), "selection": "not a rectangle"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request");
    assert!(body["details"].as_str().is_some());
    assert!(service.created().is_empty());
}

#[tokio::test]
async fn test_edit_sends_sniffed_mime_to_model() {
    let service = Arc::new(FakePredictionService::new(Script::SucceedAfter(1)));
    let mislabeled = rgb_data_uri(16, 16).replacen("image/png", "image/jpeg", 1);

    let (status, _) = post_edit(
        create_app(state_with(service.clone())),
        json!({"prompt": "sky", "image": mislabeled, "mask": gray_data_uri(16, 16)}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let image = service.last_input("image").unwrap();
    assert!(image.as_str().unwrap().starts_with("data:image/png;base64,"));
}
