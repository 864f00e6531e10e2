use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// The fixed set of storable content categories.
///
/// Each kind owns exactly one document collection and one validation rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Sprite,
    Audio,
    Score,
}

impl AssetKind {
    /// Name of the document collection holding records of this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            AssetKind::Sprite => "sprites",
            AssetKind::Audio => "audio",
            AssetKind::Score => "scores",
        }
    }
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AssetKind::Sprite => write!(f, "sprite"),
            AssetKind::Audio => write!(f, "audio"),
            AssetKind::Score => write!(f, "score"),
        }
    }
}
