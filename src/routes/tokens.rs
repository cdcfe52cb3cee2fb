// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token routes. Logging in (POST) is how a client obtains a token,
//! so these routes require no authentication themselves.

use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Token;
use crate::routes::{empty, non_empty, valid_phone};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/tokens",
        post(create_token)
            .get(get_token)
            .put(extend_token)
            .delete(delete_token),
    )
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateTokenRequest {
    phone: Option<String>,
    password: Option<String>,
}

/// Login: trade credentials for a one-hour session token.
async fn create_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTokenRequest>,
) -> Result<Json<Token>> {
    let phone = valid_phone(req.phone)?;
    let password = non_empty(req.password, "Missing required field: password")?;

    let token = state.tokens.issue(&phone, &password).await?;

    Ok(Json(token))
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct IdQuery {
    id: Option<String>,
}

async fn get_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Token>> {
    let id = non_empty(query.id, "Missing required field: id")?;

    let token = state.tokens.get(&id).await?;

    Ok(Json(token))
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ExtendTokenRequest {
    id: Option<String>,
    extend: Option<bool>,
}

/// Extension must be requested explicitly with `extend: true`.
async fn extend_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExtendTokenRequest>,
) -> Result<Json<Token>> {
    let id = non_empty(req.id, "Missing required field: id")?;
    if req.extend != Some(true) {
        return Err(AppError::MissingFields(
            "Missing required field: extend".to_string(),
        ));
    }

    let token = state.tokens.extend(&id).await?;

    Ok(Json(token))
}

async fn delete_token(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>> {
    let id = non_empty(query.id, "Missing required field: id")?;

    state.tokens.delete(&id).await?;

    Ok(empty())
}
