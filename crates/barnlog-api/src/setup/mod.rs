//! Application setup and initialization
//!
//! Wiring from `main.rs` lives here so integration tests can build the same router.

pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use barnlog_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(&config)?;

    tracing::info!("Configuration loaded and validated successfully");

    let photo_store = storage::setup_storage(&config).await?;

    let state = Arc::new(AppState::new(photo_store, config.request_timeout()));

    let router = routes::setup_routes(state.clone());

    Ok((state, router))
}
