//! Store backend selection

use anyhow::Result;
use assetvault_core::{Config, StoreBackend};
use assetvault_db::{MemoryDocumentStore, PgDocumentStore, StoreGateway};
use std::sync::Arc;

use super::database;

/// Build the one store instance every request shares.
pub async fn setup_store(config: &Config) -> Result<Arc<dyn StoreGateway>> {
    let store: Arc<dyn StoreGateway> = match config.store_backend() {
        StoreBackend::Postgres => {
            let pool = database::setup_database(config).await?;
            Arc::new(PgDocumentStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store - data is lost on restart");
            Arc::new(MemoryDocumentStore::new())
        }
    };
    Ok(store)
}
