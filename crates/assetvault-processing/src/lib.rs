//! Ingestion and read-side processing
//!
//! - [`codec`]: data-URI encoding of binary payloads
//! - [`validator`]: one validator per asset kind
//! - [`ingest`]: batch orchestration with partial-failure reporting
//! - [`normalize`]: uniform read shape over heterogeneous stored documents

pub mod codec;
pub mod ingest;
pub mod normalize;
pub mod validator;

pub use codec::{CodecError, DecodedContent, EncodedAsset};
pub use ingest::{BatchIngestor, IngestBatch};
pub use normalize::ResponseNormalizer;
pub use validator::{
    AudioValidator, RecordValidator, ScoreValidator, SpriteValidator, ValidationError,
    ValidatorSet,
};
