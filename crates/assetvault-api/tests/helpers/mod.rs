//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p assetvault-api`. Every test gets its
//! own in-memory store, so tests never share documents.

#![allow(dead_code)]

use assetvault_api::setup::routes;
use assetvault_api::state::AppState;
use assetvault_core::models::DocumentId;
use assetvault_core::models::RawDocument;
use assetvault_core::{Config, IngestLimits, ServiceConfig, StoreBackend};
use assetvault_db::{MemoryDocumentStore, StoreError, StoreGateway, StoreResult};
use async_trait::async_trait;
use axum_test::multipart::Part;
use axum_test::TestServer;
use std::sync::Arc;

/// API path prefix for tests (e.g. `/api/v0/sprites`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", assetvault_api::constants::API_PREFIX, path)
}

pub fn test_config(limits: IngestLimits) -> Config {
    Config(Box::new(ServiceConfig {
        server_port: 0,
        cors_origins: vec!["*".to_string()],
        environment: "test".to_string(),
        store_backend: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        db_timeout_seconds: 1,
        db_idle_timeout_seconds: 600,
        db_max_lifetime_seconds: 1800,
        limits,
    }))
}

/// Test application: server plus a handle on the store behind it.
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryDocumentStore,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn server_over(config: Config, store: Arc<dyn StoreGateway>) -> TestServer {
    let state = Arc::new(AppState::new(config.clone(), store).expect("Failed to build state"));
    let router = routes::setup_routes(&config, state).expect("Failed to build router");
    TestServer::new(router.into_make_service()).expect("Failed to create test server")
}

/// App over a fresh in-memory store with default limits.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(IngestLimits::default())
}

pub fn setup_test_app_with(limits: IngestLimits) -> TestApp {
    let store = MemoryDocumentStore::new();
    let server = server_over(test_config(limits), Arc::new(store.clone()));
    TestApp { server, store }
}

/// Store that is never reachable.
pub struct UnavailableStore;

#[async_trait]
impl StoreGateway for UnavailableStore {
    async fn insert_many(
        &self,
        _collection: &str,
        _documents: Vec<serde_json::Value>,
    ) -> StoreResult<Vec<DocumentId>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_all(&self, _collection: &str) -> StoreResult<Vec<RawDocument>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub fn setup_unavailable_app() -> TestServer {
    server_over(
        test_config(IngestLimits::default()),
        Arc::new(UnavailableStore),
    )
}

pub fn file_part(name: &str, bytes: &[u8], mime: &str) -> Part {
    Part::bytes(bytes::Bytes::copy_from_slice(bytes))
        .file_name(name)
        .mime_type(mime)
}
