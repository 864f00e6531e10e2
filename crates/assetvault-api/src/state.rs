//! Application state shared by every handler.

use assetvault_core::Config;
use assetvault_db::StoreGateway;
use assetvault_processing::{BatchIngestor, ResponseNormalizer, ValidatorSet};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn StoreGateway>,
    pub ingestor: BatchIngestor,
    pub normalizer: ResponseNormalizer,
}

impl AppState {
    /// Wire the ingestion pipeline and the read path over one store.
    pub fn new(config: Config, store: Arc<dyn StoreGateway>) -> Result<Self, anyhow::Error> {
        let validators = Arc::new(ValidatorSet::from_limits(config.limits())?);

        Ok(Self {
            ingestor: BatchIngestor::new(store.clone(), validators),
            normalizer: ResponseNormalizer::new(store.clone()),
            store,
            config,
        })
    }
}
