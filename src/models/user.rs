//! User model for storage.

use serde::{Deserialize, Serialize};

/// User account stored in the `users` collection, keyed by phone number.
///
/// The stored record carries the password digest; the API layer exposes its
/// own representation without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Phone number (also used as the record key, immutable)
    pub phone: String,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Keyed hash digest of the password; the plaintext is never stored
    pub hashed_password: String,
    /// Whether the user accepted the terms of service
    pub tos_agreement: bool,
    /// Ids of the checks this user owns, oldest first
    #[serde(default)]
    pub checks: Vec<String>,
}
