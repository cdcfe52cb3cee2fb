// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Keyed password hashing.
//!
//! Passwords are stored as hex HMAC-SHA256 digests keyed by the process-wide
//! hashing secret, so plaintext never reaches disk.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Hash a password with the configured secret.
///
/// The password is trimmed first; an empty password cannot be hashed.
pub fn hash(secret: &str, password: &str) -> Result<String, AppError> {
    let password = password.trim();
    if password.is_empty() {
        return Err(AppError::Hashing);
    }

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| AppError::Hashing)?;
    mac.update(password.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
