//! Document store layer (one JSON file per record).

pub mod file;

pub use file::{FileStore, StoreError};

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const TOKENS: &str = "tokens";
    pub const CHECKS: &str = "checks";
}
