//! Store abstraction trait
//!
//! This module defines the StoreGateway trait that all document store backends must implement.

use assetvault_core::models::{DocumentId, RawDocument};
use assetvault_core::AppError;
use async_trait::async_trait;
use thiserror::Error;

/// Store operation errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Write rejected: {0}")]
    WriteRejected(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store abstraction
///
/// Identifiers are assigned by the store and returned in the same order as the
/// documents passed to [`insert_many`](StoreGateway::insert_many). A single
/// instance is shared by every request for the lifetime of the process, so
/// implementations must be safe for concurrent use without external locking.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    /// Insert all documents into `collection` as one unit and return their ids.
    ///
    /// Either every document is written or none is.
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<serde_json::Value>,
    ) -> StoreResult<Vec<DocumentId>>;

    /// Every document of `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>>;

    /// Reachability check used by the readiness route.
    async fn ping(&self) -> StoreResult<()>;
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => AppError::StoreUnavailable(msg),
            StoreError::WriteRejected(msg) => AppError::WriteRejected(msg),
        }
    }
}
