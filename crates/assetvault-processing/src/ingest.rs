//! Batch ingestion: validate every item, write the survivors in one call.
//!
//! A bad item never fails the batch. The only whole-batch failure is the
//! store itself refusing or being unreachable, in which case no ids are
//! reported at all.

use assetvault_core::models::{
    AssetKind, BatchOutcome, RawUploadItem, RecordPayload, RejectedItem, ScoreInput,
};
use assetvault_core::AppError;
use assetvault_db::StoreGateway;
use std::sync::Arc;

use crate::validator::{RecordValidator, ValidationError, ValidatorSet};

/// One submitted batch. The variant fixes the asset kind of every item in it.
#[derive(Debug, Clone)]
pub enum IngestBatch {
    Sprites(Vec<RawUploadItem>),
    Audio(Vec<RawUploadItem>),
    Scores(Vec<ScoreInput>),
}

impl IngestBatch {
    /// Wrap binary uploads for `kind`. Returns `None` for [`AssetKind::Score`].
    pub fn uploads(kind: AssetKind, items: Vec<RawUploadItem>) -> Option<Self> {
        match kind {
            AssetKind::Sprite => Some(IngestBatch::Sprites(items)),
            AssetKind::Audio => Some(IngestBatch::Audio(items)),
            AssetKind::Score => None,
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            IngestBatch::Sprites(_) => AssetKind::Sprite,
            IngestBatch::Audio(_) => AssetKind::Audio,
            IngestBatch::Scores(_) => AssetKind::Score,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            IngestBatch::Sprites(items) | IngestBatch::Audio(items) => items.len(),
            IngestBatch::Scores(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type Validated = Vec<Result<RecordPayload, ValidationError>>;

fn validate_all<V: RecordValidator>(validator: &V, items: &[V::Input]) -> Validated {
    items.iter().map(|item| validator.validate(item)).collect()
}

/// Run CPU-bound validation (base64 encoding of whole files) off the async workers.
async fn validate_blocking<F>(f: F) -> Result<Validated, AppError>
where
    F: FnOnce() -> Validated + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(format!("Validation task failed: {}", e)))
}

/// Orchestrates validation and the single bulk write for one batch.
#[derive(Clone)]
pub struct BatchIngestor {
    store: Arc<dyn StoreGateway>,
    validators: Arc<ValidatorSet>,
}

impl BatchIngestor {
    pub fn new(store: Arc<dyn StoreGateway>, validators: Arc<ValidatorSet>) -> Self {
        Self { store, validators }
    }

    #[tracing::instrument(skip(self, batch), fields(kind = %batch.kind(), items = batch.len()))]
    pub async fn ingest(&self, batch: IngestBatch) -> Result<BatchOutcome, AppError> {
        let kind = batch.kind();
        if batch.is_empty() {
            tracing::debug!("Empty batch, nothing to store");
            return Ok(BatchOutcome::empty());
        }

        let validated = match batch {
            IngestBatch::Sprites(items) => {
                let validators = self.validators.clone();
                validate_blocking(move || validate_all(&validators.sprite, &items)).await?
            }
            IngestBatch::Audio(items) => {
                let validators = self.validators.clone();
                validate_blocking(move || validate_all(&validators.audio, &items)).await?
            }
            IngestBatch::Scores(items) => validate_all(&self.validators.score, &items),
        };

        self.commit(kind, validated).await
    }

    async fn commit(&self, kind: AssetKind, validated: Validated) -> Result<BatchOutcome, AppError> {
        let mut documents = Vec::with_capacity(validated.len());
        let mut rejected = Vec::new();

        for (index, result) in validated.into_iter().enumerate() {
            match result {
                Ok(payload) => documents.push(payload.into_document()),
                Err(err) => {
                    tracing::debug!(index, reason = %err.reason(), error = %err, "Item rejected");
                    rejected.push(RejectedItem {
                        index,
                        reason: err.reason(),
                        detail: Some(err.to_string()),
                    });
                }
            }
        }

        if documents.is_empty() {
            tracing::info!(
                accepted = 0,
                rejected = rejected.len(),
                "Batch fully rejected, no store call"
            );
            return Ok(BatchOutcome {
                inserted_ids: Vec::new(),
                rejected,
            });
        }

        let expected = documents.len();
        let inserted_ids = self
            .store
            .insert_many(kind.collection(), documents)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, collection = kind.collection(), "Bulk insert failed");
                AppError::from(e)
            })?;

        if inserted_ids.len() != expected {
            return Err(AppError::Internal(format!(
                "Store returned {} ids for {} documents",
                inserted_ids.len(),
                expected
            )));
        }

        tracing::info!(
            accepted = inserted_ids.len(),
            rejected = rejected.len(),
            "Batch ingested"
        );

        Ok(BatchOutcome {
            inserted_ids,
            rejected,
        })
    }
}
