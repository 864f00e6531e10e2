//! Application setup and initialization
//!
//! [`initialize_app`] is the composition root: it picks the store backend,
//! wires the ingestion pipeline over it and builds the router.

pub mod database;
pub mod routes;
pub mod server;
pub mod store;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use assetvault_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.environment())?;

    tracing::info!(
        store_backend = %config.store_backend(),
        "Configuration loaded and validated successfully"
    );

    let store = store::setup_store(&config).await?;

    let state = Arc::new(
        AppState::new(config.clone(), store).context("Failed to build application state")?,
    );

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
