// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod checks;
pub mod tokens;
pub mod users;

use crate::error::{AppError, Result};
use crate::AppState;
use axum::http::{header, HeaderMap, HeaderName, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Serialize)]
pub struct PingResponse {
    pub status: String,
}

/// Liveness check.
async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok".to_string(),
    })
}

/// JSON 404 for unmatched paths.
async fn not_found() -> AppError {
    AppError::NotFound("The requested resource does not exist".to_string())
}

/// Bearer credential carried in the `token` header.
pub(crate) fn token_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get("token")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

/// Trim and require a non-empty string field.
pub(crate) fn non_empty(value: Option<String>, message: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingFields(message.to_string())),
    }
}

/// Optional update fields: absent is fine, present-but-empty is rejected.
pub(crate) fn optional_non_empty(value: Option<String>, message: &str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => non_empty(Some(v), message).map(Some),
    }
}

/// E.164-ish phone shape: optional leading `+`, then 10-15 digits.
pub(crate) fn valid_phone(value: Option<String>) -> Result<String> {
    let phone = non_empty(value, "Missing required field: phone")?;

    let digits = phone.strip_prefix('+').unwrap_or(&phone);
    let ok = (10..=15).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());

    if ok {
        Ok(phone)
    } else {
        Err(AppError::MissingFields("Invalid phone number".to_string()))
    }
}

/// Empty JSON object for mutations with nothing else to report.
pub(crate) fn empty() -> Json<serde_json::Value> {
    Json(serde_json::json!({}))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // Permissive CORS: the API is consumed cross-origin with a custom
    // `token` header and no cookies.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("token"),
        ]);

    Router::new()
        .route("/ping", get(ping))
        .merge(users::routes())
        .merge(tokens::routes())
        .merge(checks::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
