//! Assetvault API Library
//!
//! This crate provides the HTTP handlers, the OpenAPI document and application setup.

// Module declarations
mod api_doc;
pub mod constants;
mod handlers;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use handlers::IngestResponse;
