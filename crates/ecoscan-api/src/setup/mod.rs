//! Application setup and initialization
//!
//! Everything `main` needs to go from a loaded `Config` to a router, kept out of
//! `main.rs` so integration tests can build the same app.

pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ecoscan_core::Config;

use crate::services::eco_score::EcoScoreClient;
use crate::state::AppState;

/// Initialize the entire application: tracing, upload directories, services and routes.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format(), config.environment())?;

    tracing::info!("Configuration loaded and validated successfully");

    build_app(config).await
}

/// Build state and router without touching global tracing setup.
pub async fn build_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let slots = storage::setup_storage(&config).await?;

    let eco_score = EcoScoreClient::new(
        config.eco_score_api_url(),
        Duration::from_secs(config.eco_score_timeout_secs()),
    )?;

    let state = Arc::new(AppState::new(config.clone(), slots, eco_score));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
