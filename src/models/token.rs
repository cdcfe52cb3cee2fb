// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session token stored in the `tokens` collection, keyed by id.
///
/// The id doubles as the opaque bearer credential sent in the `token`
/// header. Expired tokens stay on disk and are rejected lazily at
/// verification time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    /// Owning user's phone number
    pub phone: String,
    /// Instant the token stops being valid
    pub expires: DateTime<Utc>,
}

impl Token {
    /// A token grants access to `phone`'s resources only while unexpired.
    /// Both conditions must hold; a live token for another user is invalid.
    pub fn is_valid_for(&self, phone: &str, now: DateTime<Utc>) -> bool {
        self.phone == phone && self.expires > now
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}
