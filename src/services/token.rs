// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issue, verification, extension, and deletion.

use chrono::{Duration, Utc};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::error::{AppError, Result};
use crate::models::{Token, User};
use crate::services::password;
use crate::store::{collections, FileStore, StoreError};

/// Lifetime granted at issue and on each extension.
const TOKEN_TTL_HOURS: i64 = 1;

/// Length of generated token and check ids.
const ID_LENGTH: usize = 20;

/// Generate a random alphanumeric record id.
pub(crate) fn generate_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Service for issuing and validating session tokens.
#[derive(Clone)]
pub struct TokenService {
    store: FileStore,
    hashing_secret: String,
}

impl TokenService {
    pub fn new(store: FileStore, hashing_secret: String) -> Self {
        Self {
            store,
            hashing_secret,
        }
    }

    /// Log a user in: check credentials and persist a fresh one-hour token.
    pub async fn issue(&self, phone: &str, password_plain: &str) -> Result<Token> {
        let user: User = self
            .store
            .read(collections::USERS, phone)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::BadRequest("Could not find the specified user".to_string())
                }
                other => AppError::Store(other),
            })?;

        let hashed = password::hash(&self.hashing_secret, password_plain)?;
        if hashed != user.hashed_password {
            return Err(AppError::BadRequest("Password did not match".to_string()));
        }

        let token = Token {
            id: generate_id(),
            phone: phone.to_string(),
            expires: Utc::now() + Duration::hours(TOKEN_TTL_HOURS),
        };
        self.store
            .create(collections::TOKENS, &token.id, &token)
            .await?;

        tracing::debug!(phone = %token.phone, "Issued session token");

        Ok(token)
    }

    /// Look up a token by id.
    pub async fn get(&self, id: &str) -> Result<Token> {
        self.store
            .read(collections::TOKENS, id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::NotFound("The specified token does not exist".to_string())
                }
                other => AppError::Store(other),
            })
    }

    /// Push an unexpired token's expiry one hour out from now.
    ///
    /// An expired token is rejected without touching the stored record.
    pub async fn extend(&self, id: &str) -> Result<Token> {
        let mut token: Token = self
            .store
            .read(collections::TOKENS, id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::BadRequest("The specified token does not exist".to_string())
                }
                other => AppError::Store(other),
            })?;

        if token.is_expired(Utc::now()) {
            return Err(AppError::TokenExpired);
        }

        token.expires = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
        self.store.update(collections::TOKENS, id, &token).await?;

        Ok(token)
    }

    /// Delete a token (logout).
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store
            .delete(collections::TOKENS, id)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::BadRequest("Could not find the specified token".to_string())
                }
                other => AppError::Store(other),
            })
    }

    /// Check that `token_id` names a live token owned by `phone`.
    ///
    /// Never fails: a missing, unreadable, expired, or foreign token all
    /// read as invalid.
    pub async fn verify(&self, token_id: Option<&str>, phone: &str) -> bool {
        let Some(id) = token_id else {
            return false;
        };

        match self.store.read::<Token>(collections::TOKENS, id).await {
            Ok(token) => token.is_valid_for(phone, Utc::now()),
            Err(_) => false,
        }
    }
}
