use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

use super::record::DocumentId;

/// Why a single batch item was refused. Never aborts the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RejectionReason {
    MissingName,
    EmptyPayload,
    PayloadTooLarge,
    InvalidName,
    ScoreOutOfRange,
    #[serde(rename = "MalformedContentError")]
    MalformedContent,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::MissingName => "MissingName",
            RejectionReason::EmptyPayload => "EmptyPayload",
            RejectionReason::PayloadTooLarge => "PayloadTooLarge",
            RejectionReason::InvalidName => "InvalidName",
            RejectionReason::ScoreOutOfRange => "ScoreOutOfRange",
            RejectionReason::MalformedContent => "MalformedContentError",
        }
    }
}

impl Display for RejectionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RejectedItem {
    /// Position of the item in the submitted batch.
    pub index: usize,
    pub reason: RejectionReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of one ingestion call.
///
/// `inserted_ids` follows the submission order of the accepted items only;
/// rejected items are reported by their original index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BatchOutcome {
    pub inserted_ids: Vec<DocumentId>,
    pub rejected: Vec<RejectedItem>,
}

impl BatchOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of items the outcome accounts for.
    pub fn total(&self) -> usize {
        self.inserted_ids.len() + self.rejected.len()
    }
}
