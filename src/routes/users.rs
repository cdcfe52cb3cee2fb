// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account routes.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::User;
use crate::routes::{empty, non_empty, optional_non_empty, token_header, valid_phone};
use crate::services::UserUpdate;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/users",
        post(create_user)
            .get(get_user)
            .put(update_user)
            .delete(delete_user),
    )
}

/// Body for user signup. Everything is optional on the wire; presence is
/// checked explicitly so shape failures come back as 400s.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserRequest {
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    password: Option<String>,
    tos_agreement: Option<bool>,
}

/// User representation returned by the API.
///
/// Deliberately has no `hashedPassword` field; the digest never leaves the
/// store layer.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub tos_agreement: bool,
    pub checks: Vec<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            phone: user.phone,
            first_name: user.first_name,
            last_name: user.last_name,
            tos_agreement: user.tos_agreement,
            checks: user.checks,
        }
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let first_name = non_empty(req.first_name, "Missing required field: firstName")?;
    let last_name = non_empty(req.last_name, "Missing required field: lastName")?;
    let phone = valid_phone(req.phone)?;
    let password = non_empty(req.password, "Missing required field: password")?;
    if req.tos_agreement != Some(true) {
        return Err(AppError::MissingFields(
            "Terms of service must be accepted".to_string(),
        ));
    }

    state
        .users
        .create(&phone, &first_name, &last_name, &password)
        .await?;

    Ok(empty())
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct PhoneQuery {
    phone: Option<String>,
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhoneQuery>,
    headers: HeaderMap,
) -> Result<Json<UserResponse>> {
    let phone = valid_phone(query.phone)?;
    let token = token_header(&headers);

    let user = state.users.get(&phone, token.as_deref()).await?;

    Ok(Json(user.into()))
}

/// Body for profile updates. `phone` selects the record and is immutable;
/// at least one other field must be present.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateUserRequest {
    phone: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    password: Option<String>,
}

async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>> {
    let phone = valid_phone(req.phone)?;
    let update = UserUpdate {
        first_name: optional_non_empty(req.first_name, "firstName must be a non-empty string")?,
        last_name: optional_non_empty(req.last_name, "lastName must be a non-empty string")?,
        password: optional_non_empty(req.password, "password must be a non-empty string")?,
    };
    let token = token_header(&headers);

    state.users.update(&phone, token.as_deref(), update).await?;

    Ok(empty())
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PhoneQuery>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    let phone = valid_phone(query.phone)?;
    let token = token_header(&headers);

    state.users.delete(&phone, token.as_deref()).await?;

    Ok(empty())
}
