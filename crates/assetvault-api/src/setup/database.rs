//! Database setup and initialization

use anyhow::{Context, Result};
use assetvault_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::path::Path;
use std::time::Duration;

/// Setup database connection pool and run migrations
pub async fn setup_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url()
        .context("DATABASE_URL is required for the postgres store backend")?;

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections())
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds()))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout_seconds()))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime_seconds()))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections(),
        idle_timeout_secs = config.db_idle_timeout_seconds(),
        max_lifetime_secs = config.db_max_lifetime_seconds(),
        "Database connected successfully"
    );

    // Run pending migrations on startup (path: workspace migrations/ from crate root)
    let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../migrations");
    let migrator = sqlx::migrate::Migrator::new(migrations_dir)
        .await
        .context("Failed to load migrations")?;
    migrator
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}
