//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup and threaded into the services as
//! immutable values; nothing re-reads the environment afterwards.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment name (staging/production), used in startup logs
    pub env_name: String,
    /// Server port
    pub port: u16,
    /// Root directory for the document store
    pub data_dir: PathBuf,
    /// Secret key for password digests
    pub hashing_secret: String,
    /// Maximum number of checks a single user may own
    pub max_checks: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            env_name: env::var("APP_ENV").unwrap_or_else(|_| "staging".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| ".data".to_string())
                .into(),
            hashing_secret: env::var("HASHING_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("HASHING_SECRET"))?,
            max_checks: env::var("MAX_CHECKS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("MAX_CHECKS"))?,
        })
    }

    /// Config for tests only. Tests override `data_dir` with a per-test
    /// temporary directory.
    pub fn test_default() -> Self {
        Self {
            env_name: "test".to_string(),
            port: 0,
            data_dir: ".data-test".into(),
            hashing_secret: "test_hashing_secret".to_string(),
            max_checks: 5,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
