pub mod asset;
pub mod outcome;
pub mod record;
pub mod upload;

pub use asset::AssetKind;
pub use outcome::{BatchOutcome, RejectedItem, RejectionReason};
pub use record::{
    BinaryPayload, BinaryRecord, DocumentId, RawDocument, RecordPayload, ScorePayload,
    ScoreRecord, StoredRecord,
};
pub use upload::{RawUploadItem, ScoreInput};
