// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dispatcher-level tests: liveness, 404s, and method routing.

use axum::http::StatusCode;
use tower::ServiceExt;

mod common;

use common::{bare_request, response_json};

#[tokio::test]
async fn test_ping() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .oneshot(bare_request("GET", "/ping", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .oneshot(bare_request("GET", "/definitely/not/here", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unrouted_method_returns_405() {
    let (app, _state, _dir) = common::create_test_app().await;

    let response = app
        .oneshot(bare_request("DELETE", "/ping", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
