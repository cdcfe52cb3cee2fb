// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Uptime-Tracker: user accounts, session tokens, and uptime checks
//!
//! This crate provides the backend API for managing user accounts and the
//! uptime checks they register, with every record persisted as an individual
//! JSON document on local disk.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use config::Config;
use services::{CheckService, TokenService, UserService};
use store::FileStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: FileStore,
    pub tokens: TokenService,
    pub users: UserService,
    pub checks: CheckService,
}
