// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use tempfile::TempDir;
use tower::ServiceExt;
use uptime_tracker::config::Config;
use uptime_tracker::routes::create_router;
use uptime_tracker::services::{CheckService, TokenService, UserService};
use uptime_tracker::store::FileStore;
use uptime_tracker::AppState;

#[allow(dead_code)]
pub const TEST_PHONE: &str = "15551234567";
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct-horse";

/// Create a test app backed by a fresh temporary data directory.
///
/// The returned `TempDir` must be kept alive for the duration of the test.
pub async fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");

    let mut config = Config::test_default();
    config.data_dir = data_dir.path().to_path_buf();

    let store = FileStore::open(&config.data_dir)
        .await
        .expect("Failed to open test store");

    let tokens = TokenService::new(store.clone(), config.hashing_secret.clone());
    let users = UserService::new(store.clone(), tokens.clone(), config.hashing_secret.clone());
    let checks = CheckService::new(store.clone(), config.max_checks);

    let state = Arc::new(AppState {
        config,
        store,
        tokens,
        users,
        checks,
    });

    (create_router(state.clone()), state, data_dir)
}

/// Build a JSON request, optionally carrying a `token` header.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header("token", token);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a body-less request (GET/DELETE), optionally with a `token` header.
#[allow(dead_code)]
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("token", token);
    }
    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

/// Sign up a user with the standard test profile.
#[allow(dead_code)]
pub async fn signup(app: &axum::Router, phone: &str) {
    let body = serde_json::json!({
        "firstName": "Test",
        "lastName": "User",
        "phone": phone,
        "password": TEST_PASSWORD,
        "tosAgreement": true,
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/users", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "signup failed for {phone}");
}

/// Log in and return the issued token id.
#[allow(dead_code)]
pub async fn login(app: &axum::Router, phone: &str, password: &str) -> String {
    let body = serde_json::json!({ "phone": phone, "password": password });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/tokens", None, body))
        .await
        .unwrap();
    assert_eq!(response.status(), 200, "login failed for {phone}");

    let body = response_json(response).await;
    body["id"].as_str().expect("token response had no id").to_string()
}
