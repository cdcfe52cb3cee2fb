// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    MissingFields(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Missing required token in header, or token is invalid")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("The token has already expired and cannot be extended")]
    TokenExpired,

    #[error("The user already has the maximum number of checks ({0})")]
    MaxChecksReached(usize),

    #[error("Could not hash the password")]
    Hashing,

    #[error("Created the check but could not update the user's check list")]
    PartialFailure { check_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::MissingFields(msg) | AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone(), None)
            }
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string(), None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::TokenExpired | AppError::MaxChecksReached(_) => {
                (StatusCode::BAD_REQUEST, self.to_string(), None)
            }
            AppError::Hashing => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None),
            AppError::PartialFailure { check_id } => {
                tracing::error!(check_id = %check_id, "Check left orphaned by failed user update");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    self.to_string(),
                    Some(check_id.clone()),
                )
            }
            // Services map Conflict/NotFound to the variants above with
            // operation-specific messages; these arms cover the `?` path.
            AppError::Store(StoreError::Conflict) => (
                StatusCode::BAD_REQUEST,
                "A record with that key already exists".to_string(),
                None,
            ),
            AppError::Store(StoreError::NotFound) => (
                StatusCode::NOT_FOUND,
                "The requested record does not exist".to_string(),
                None,
            ),
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, details };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
