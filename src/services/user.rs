// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User account management.

use crate::error::{AppError, Result};
use crate::models::User;
use crate::services::password;
use crate::services::token::TokenService;
use crate::store::{collections, FileStore, StoreError};

/// Fields accepted by a profile update. At least one must be present.
#[derive(Debug, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.password.is_none()
    }
}

/// Service for creating and maintaining user records.
#[derive(Clone)]
pub struct UserService {
    store: FileStore,
    tokens: TokenService,
    hashing_secret: String,
}

impl UserService {
    pub fn new(store: FileStore, tokens: TokenService, hashing_secret: String) -> Self {
        Self {
            store,
            tokens,
            hashing_secret,
        }
    }

    /// Sign up a new user.
    ///
    /// The store's exclusive create is the only duplicate-phone arbiter;
    /// there is no existence probe ahead of it.
    pub async fn create(
        &self,
        phone: &str,
        first_name: &str,
        last_name: &str,
        password_plain: &str,
    ) -> Result<()> {
        let user = User {
            phone: phone.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            hashed_password: password::hash(&self.hashing_secret, password_plain)?,
            tos_agreement: true,
            checks: Vec::new(),
        };

        self.store
            .create(collections::USERS, phone, &user)
            .await
            .map_err(|err| match err {
                StoreError::Conflict => AppError::Conflict(
                    "A user with that phone number already exists".to_string(),
                ),
                other => AppError::Store(other),
            })?;

        tracing::info!(phone = %user.phone, "User created");

        Ok(())
    }

    /// Fetch a user record. Requires a token belonging to that user.
    pub async fn get(&self, phone: &str, token_id: Option<&str>) -> Result<User> {
        if !self.tokens.verify(token_id, phone).await {
            return Err(AppError::Forbidden);
        }

        self.store
            .read(collections::USERS, phone)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::NotFound("The specified user does not exist".to_string())
                }
                other => AppError::Store(other),
            })
    }

    /// Merge profile updates into the stored record.
    ///
    /// Read-modify-write with no isolation: concurrent updates to the same
    /// user are last-writer-wins.
    pub async fn update(
        &self,
        phone: &str,
        token_id: Option<&str>,
        update: UserUpdate,
    ) -> Result<()> {
        if update.is_empty() {
            return Err(AppError::MissingFields("Missing fields to update".to_string()));
        }
        if !self.tokens.verify(token_id, phone).await {
            return Err(AppError::Forbidden);
        }

        let mut user: User = self
            .store
            .read(collections::USERS, phone)
            .await
            .map_err(|err| match err {
                StoreError::NotFound => {
                    AppError::BadRequest("The specified user does not exist".to_string())
                }
                other => AppError::Store(other),
            })?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(password_plain) = update.password {
            user.hashed_password = password::hash(&self.hashing_secret, &password_plain)?;
        }

        self.store.update(collections::USERS, phone, &user).await?;

        Ok(())
    }

    /// Delete a user record.
    ///
    /// Owned tokens and checks are NOT cascaded; they are logged and left
    /// for out-of-band reconciliation.
    pub async fn delete(&self, phone: &str, token_id: Option<&str>) -> Result<()> {
        if !self.tokens.verify(token_id, phone).await {
            return Err(AppError::Forbidden);
        }

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

        self.store.delete(collections::USERS, phone).await?;

        if !user.checks.is_empty() {
            tracing::warn!(
                phone = %phone,
                orphaned_checks = user.checks.len(),
                "User deleted with check records left behind"
            );
        }
        tracing::info!(phone = %phone, "User deleted");

        Ok(())
    }
}
