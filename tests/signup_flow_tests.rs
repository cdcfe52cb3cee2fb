// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end signup → login → fetch flow.

use axum::http::StatusCode;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{bare_request, json_request, response_json};

#[tokio::test]
async fn test_signup_login_fetch_flow() {
    let (app, _state, _dir) = common::create_test_app().await;

    // Signup
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            None,
            json!({
                "firstName": "A",
                "lastName": "B",
                "phone": "15551234567",
                "password": "pw",
                "tosAgreement": true,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Login with the wrong password
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/tokens",
            None,
            json!({"phone": "15551234567", "password": "nope"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Password did not match");

    // Login with the right password
    let before = Utc::now();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/tokens",
            None,
            json!({"phone": "15551234567", "password": "pw"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let token = body["id"].as_str().unwrap().to_string();

    let expires: DateTime<Utc> = body["expires"].as_str().unwrap().parse().unwrap();
    let ttl = expires - before;
    assert!(ttl > Duration::milliseconds(3_500_000), "ttl was {ttl}");
    assert!(ttl <= Duration::milliseconds(3_700_000), "ttl was {ttl}");

    // Fetch the profile with the token
    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            "/users?phone=15551234567",
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["firstName"], "A");
    assert_eq!(body["lastName"], "B");
    assert_eq!(body["checks"], json!([]));
    assert!(body.get("hashedPassword").is_none());

    // And without it
    let response = app
        .oneshot(bare_request("GET", "/users?phone=15551234567", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
