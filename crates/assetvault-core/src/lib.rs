//! Assetvault Core Library
//!
//! Domain models, error types and configuration shared by the ingestion
//! pipeline, the document store gateway and the HTTP API.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, IngestLimits, ServiceConfig, StoreBackend};
pub use error::{AppError, ErrorMetadata, LogLevel};
