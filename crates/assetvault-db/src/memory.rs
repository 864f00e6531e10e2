//! In-process document store for development and tests.

use assetvault_core::models::{DocumentId, RawDocument};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::store::{StoreError, StoreGateway, StoreResult};

/// Documents grouped by collection, kept in insertion order.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Vec<RawDocument>>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a document with a caller-chosen id and body, bypassing validation.
    /// Used to seed legacy-shaped documents.
    pub fn seed(&self, collection: &str, id: DocumentId, body: serde_json::Value) -> StoreResult<()> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(RawDocument { id, body });
        Ok(())
    }

    /// Number of documents currently held in `collection`.
    pub fn count(&self, collection: &str) -> StoreResult<usize> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(collection).map(Vec::len).unwrap_or(0))
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl StoreGateway for MemoryDocumentStore {
    #[tracing::instrument(skip(self, documents), fields(db.collection = %collection, count = documents.len()))]
    async fn insert_many(
        &self,
        collection: &str,
        documents: Vec<serde_json::Value>,
    ) -> StoreResult<Vec<DocumentId>> {
        let mut collections = self.collections.write().map_err(|_| poisoned())?;
        let entries = collections.entry(collection.to_string()).or_default();

        let mut ids = Vec::with_capacity(documents.len());
        for body in documents {
            let id = DocumentId::from(Uuid::new_v4());
            entries.push(RawDocument {
                id: id.clone(),
                body,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    #[tracing::instrument(skip(self), fields(db.collection = %collection))]
    async fn find_all(&self, collection: &str) -> StoreResult<Vec<RawDocument>> {
        let collections = self.collections.read().map_err(|_| poisoned())?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn ping(&self) -> StoreResult<()> {
        self.collections.read().map(|_| ()).map_err(|_| poisoned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_many_returns_ids_in_order() {
        let store = MemoryDocumentStore::new();
        let ids = store
            .insert_many("scores", vec![json!({"score": 1}), json!({"score": 2})])
            .await
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);

        let docs = store.find_all("scores").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, ids[0]);
        assert_eq!(docs[0].body["score"], 1);
        assert_eq!(docs[1].id, ids[1]);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryDocumentStore::new();
        store
            .insert_many("sprites", vec![json!({"name": "a.png"})])
            .await
            .unwrap();
        assert!(store.find_all("audio").await.unwrap().is_empty());
        assert_eq!(store.count("sprites").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_seed_is_visible_to_find_all() {
        let store = MemoryDocumentStore::new();
        store
            .seed("scores", DocumentId::new("legacy-1"), json!({"playerName": "Old"}))
            .unwrap();
        let docs = store.find_all("scores").await.unwrap();
        assert_eq!(docs[0].id.as_str(), "legacy-1");
        assert!(store.ping().await.is_ok());
    }
}
