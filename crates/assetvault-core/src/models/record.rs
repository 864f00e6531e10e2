use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use utoipa::ToSchema;

/// Store-assigned identifier. Opaque to everything outside the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<uuid::Uuid> for DocumentId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id.to_string())
    }
}

/// A document exactly as the store returned it. The body shape is not trusted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    pub id: DocumentId,
    pub body: serde_json::Value,
}

/// Persisted layout of a sprite or audio document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryPayload {
    pub name: String,
    /// Data-URI: `data:<mime>;base64,<payload>`
    pub content: String,
    pub content_type: String,
}

/// Persisted layout of a score document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePayload {
    pub player_name: String,
    pub score: i64,
}

/// A validated record ready to be written, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordPayload {
    Binary(BinaryPayload),
    Score(ScorePayload),
}

impl RecordPayload {
    /// Document body in the persisted field layout.
    pub fn into_document(self) -> serde_json::Value {
        match self {
            RecordPayload::Binary(b) => serde_json::json!({
                "name": b.name,
                "content": b.content,
                "content_type": b.content_type,
            }),
            RecordPayload::Score(s) => serde_json::json!({
                "player_name": s.player_name,
                "score": s.score,
            }),
        }
    }
}

/// Normalized sprite or audio record returned to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BinaryRecord {
    pub id: DocumentId,
    pub name: Option<String>,
    pub content: Option<String>,
    pub content_type: Option<String>,
    /// Set when a required field was missing or unreadable in the stored document.
    pub incomplete: bool,
}

/// Normalized score record returned to readers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScoreRecord {
    pub id: DocumentId,
    pub player_name: Option<String>,
    pub score: Option<i64>,
    pub incomplete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StoredRecord {
    Binary(BinaryRecord),
    Score(ScoreRecord),
}

impl StoredRecord {
    pub fn id(&self) -> &DocumentId {
        match self {
            StoredRecord::Binary(r) => &r.id,
            StoredRecord::Score(r) => &r.id,
        }
    }

    pub fn is_incomplete(&self) -> bool {
        match self {
            StoredRecord::Binary(r) => r.incomplete,
            StoredRecord::Score(r) => r.incomplete,
        }
    }
}
