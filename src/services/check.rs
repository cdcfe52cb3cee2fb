// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime check creation with per-user quota.

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{Check, CheckMethod, Protocol, Token, User};
use crate::services::token::generate_id;
use crate::store::{collections, FileStore};

/// Validated fields for a new check.
#[derive(Debug)]
pub struct NewCheck {
    pub protocol: Protocol,
    pub url: String,
    pub method: CheckMethod,
    pub success_codes: Vec<u16>,
    pub timeout_seconds: u64,
}

/// Service for creating uptime checks.
#[derive(Clone)]
pub struct CheckService {
    store: FileStore,
    max_checks: usize,
}

impl CheckService {
    pub fn new(store: FileStore, max_checks: usize) -> Self {
        Self { store, max_checks }
    }

    /// Create a check owned by the bearer of `token_id`.
    ///
    /// The owner comes from the token record itself, so no phone is supplied.
    /// The check is persisted first and then linked into the owner's `checks`
    /// list; if that second write fails the check is orphaned, and the error
    /// carries its id so operators can reconcile.
    pub async fn create(&self, token_id: Option<&str>, new: NewCheck) -> Result<Check> {
        let Some(token_id) = token_id else {
            return Err(AppError::Forbidden);
        };

        let token: Token = match self.store.read(collections::TOKENS, token_id).await {
            Ok(token) => token,
            Err(_) => return Err(AppError::Forbidden),
        };
        if token.is_expired(Utc::now()) {
            return Err(AppError::Forbidden);
        }

        let mut user: User = match self.store.read(collections::USERS, &token.phone).await {
            Ok(user) => user,
            Err(_) => return Err(AppError::Forbidden),
        };

        if user.checks.len() >= self.max_checks {
            return Err(AppError::MaxChecksReached(self.max_checks));
        }

        let check = Check {
            id: generate_id(),
            user_phone: user.phone.clone(),
            protocol: new.protocol,
            url: new.url,
            method: new.method,
            success_codes: new.success_codes,
            timeout_seconds: new.timeout_seconds,
        };
        self.store
            .create(collections::CHECKS, &check.id, &check)
            .await?;

        user.checks.push(check.id.clone());
        if let Err(err) = self
            .store
            .update(collections::USERS, &user.phone, &user)
            .await
        {
            tracing::error!(
                error = %err,
                check_id = %check.id,
                phone = %user.phone,
                "Failed to link new check to its owner"
            );
            return Err(AppError::PartialFailure { check_id: check.id });
        }

        tracing::info!(
            check_id = %check.id,
            phone = %user.phone,
            count = user.checks.len(),
            "Check created"
        );

        Ok(check)
    }
}
