// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime check routes. Creation only; check updates and deletion are a
//! future extension.

use axum::{extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::{Check, CheckMethod, Protocol};
use crate::routes::{non_empty, token_header};
use crate::services::NewCheck;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/checks", post(create_check))
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCheckRequest {
    protocol: Option<String>,
    url: Option<String>,
    method: Option<String>,
    success_codes: Option<Vec<u16>>,
    timeout_seconds: Option<u64>,
}

async fn create_check(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<CreateCheckRequest>,
) -> Result<Json<Check>> {
    let protocol = req
        .protocol
        .as_deref()
        .and_then(Protocol::parse)
        .ok_or_else(|| {
            AppError::MissingFields("protocol must be one of: http, https".to_string())
        })?;
    let url = non_empty(req.url, "Missing required field: url")?;
    let method = req
        .method
        .as_deref()
        .and_then(CheckMethod::parse)
        .ok_or_else(|| {
            AppError::MissingFields("method must be one of: get, post, put, delete".to_string())
        })?;
    let success_codes = match req.success_codes {
        Some(codes) if !codes.is_empty() => codes,
        _ => {
            return Err(AppError::MissingFields(
                "successCodes must be a non-empty list of status codes".to_string(),
            ))
        }
    };
    let max_timeout = state.config.max_checks as u64;
    let timeout_seconds = match req.timeout_seconds {
        Some(t) if (1..=max_timeout).contains(&t) => t,
        _ => {
            return Err(AppError::MissingFields(format!(
                "timeoutSeconds must be a whole number between 1 and {max_timeout}"
            )))
        }
    };

    let token = token_header(&headers);
    let check = state
        .checks
        .create(
            token.as_deref(),
            NewCheck {
                protocol,
                url,
                method,
                success_codes,
                timeout_seconds,
            },
        )
        .await?;

    Ok(Json(check))
}
