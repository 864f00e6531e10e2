//! Document store gateway
//!
//! [`StoreGateway`] is the only way the rest of the service reaches persisted
//! documents. Two backends implement it: [`PgDocumentStore`] keeps every
//! collection in one Postgres JSONB table, [`MemoryDocumentStore`] keeps them
//! in process for development and tests.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{StoreError, StoreGateway, StoreResult};
