// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Uptime-Tracker API Server
//!
//! Manages user accounts, session tokens, and the uptime checks users
//! register, persisted as JSON documents on local disk.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uptime_tracker::{
    config::Config,
    services::{CheckService, TokenService, UserService},
    store::FileStore,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(
        port = config.port,
        env = %config.env_name,
        max_checks = config.max_checks,
        "Starting Uptime-Tracker API"
    );

    // Open the document store
    let store = FileStore::open(&config.data_dir)
        .await
        .expect("Failed to open document store");

    // Wire up services
    let tokens = TokenService::new(store.clone(), config.hashing_secret.clone());
    let users = UserService::new(store.clone(), tokens.clone(), config.hashing_secret.clone());
    let checks = CheckService::new(store.clone(), config.max_checks);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        tokens,
        users,
        checks,
    });

    // Build router
    let app = uptime_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("uptime_tracker=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
