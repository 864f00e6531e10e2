//! Read-side normalization of stored documents.
//!
//! Documents come from a schemaless store and may predate the current field
//! layout. Every document maps to exactly one [`StoredRecord`]; anything that
//! cannot be recovered is reported as `null` with `incomplete: true`.

use assetvault_core::models::{
    AssetKind, BinaryRecord, RawDocument, ScoreRecord, StoredRecord,
};
use assetvault_core::AppError;
use assetvault_db::StoreGateway;
use serde_json::Value;
use std::sync::Arc;

use crate::codec::{self, DEFAULT_MIME};

const NAME_KEYS: &[&str] = &["name", "filename", "file_name"];
const CONTENT_KEYS: &[&str] = &["content", "data"];
const MIME_KEYS: &[&str] = &["content_type", "contentType", "mime_type"];
const PLAYER_KEYS: &[&str] = &["player_name", "playerName", "name"];
const SCORE_KEYS: &[&str] = &["score", "points"];

fn first_value<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| body.get(*key))
        .find(|value| !value.is_null())
}

fn first_str<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a str> {
    first_value(body, keys)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Integers, integral floats, numeric strings and extended-JSON number wrappers.
fn as_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Object(map) if map.len() == 1 => map
            .iter()
            .find(|(key, _)| key.starts_with("$number"))
            .and_then(|(_, inner)| as_score(inner)),
        _ => None,
    }
}

/// Maps raw documents into the uniform read shape, and reads collections through the store.
#[derive(Clone)]
pub struct ResponseNormalizer {
    store: Arc<dyn StoreGateway>,
}

impl ResponseNormalizer {
    pub fn new(store: Arc<dyn StoreGateway>) -> Self {
        Self { store }
    }

    /// Every stored record of `kind`, normalized. Fails only when the store is unreachable.
    #[tracing::instrument(skip(self), fields(collection = kind.collection()))]
    pub async fn read(&self, kind: AssetKind) -> Result<Vec<StoredRecord>, AppError> {
        let documents = self.store.find_all(kind.collection()).await?;
        let records = Self::normalize(kind, documents);

        let incomplete = records.iter().filter(|r| r.is_incomplete()).count();
        tracing::debug!(count = records.len(), incomplete, "Collection read");
        Ok(records)
    }

    /// One record per document, in the same order.
    pub fn normalize(kind: AssetKind, documents: Vec<RawDocument>) -> Vec<StoredRecord> {
        documents
            .into_iter()
            .map(|doc| {
                let record = match kind {
                    AssetKind::Sprite | AssetKind::Audio => {
                        StoredRecord::Binary(normalize_binary(doc))
                    }
                    AssetKind::Score => StoredRecord::Score(normalize_score(doc)),
                };
                if record.is_incomplete() {
                    tracing::warn!(
                        document_id = %record.id(),
                        collection = kind.collection(),
                        "Stored document is incomplete"
                    );
                }
                record
            })
            .collect()
    }
}

fn normalize_score(doc: RawDocument) -> ScoreRecord {
    let player_name = first_str(&doc.body, PLAYER_KEYS).map(str::to_string);
    let score = first_value(&doc.body, SCORE_KEYS).and_then(as_score);
    let incomplete = player_name.is_none() || score.is_none();

    ScoreRecord {
        id: doc.id,
        player_name,
        score,
        incomplete,
    }
}

fn normalize_binary(doc: RawDocument) -> BinaryRecord {
    let name = first_str(&doc.body, NAME_KEYS).map(str::to_string);
    let stored_mime = first_str(&doc.body, MIME_KEYS).and_then(codec::normalize_mime);
    let mut incomplete = name.is_none();

    let (content, content_type) = match first_str(&doc.body, CONTENT_KEYS) {
        None => {
            incomplete = true;
            (None, stored_mime)
        }
        Some(raw) if raw.starts_with("data:") => match codec::decode(raw) {
            Ok(decoded) => {
                // The data-URI prefix is authoritative for the MIME type.
                if stored_mime.as_deref() != Some(decoded.mime.as_str()) {
                    incomplete = true;
                }
                (Some(raw.to_string()), Some(decoded.mime))
            }
            Err(e) => {
                tracing::debug!(document_id = %doc.id, error = %e, "Undecodable data-URI");
                incomplete = true;
                (Some(raw.to_string()), stored_mime)
            }
        },
        // Legacy layout: bare base64 next to a separate content type.
        Some(raw) => match codec::decode_base64(raw) {
            Ok(bytes) => match stored_mime {
                Some(mime) => (Some(codec::encode_with_mime(&bytes, &mime)), Some(mime)),
                None => {
                    incomplete = true;
                    (
                        Some(codec::encode_with_mime(&bytes, DEFAULT_MIME)),
                        Some(DEFAULT_MIME.to_string()),
                    )
                }
            },
            Err(e) => {
                tracing::debug!(document_id = %doc.id, error = %e, "Undecodable legacy content");
                incomplete = true;
                (Some(raw.to_string()), stored_mime)
            }
        },
    };

    BinaryRecord {
        id: doc.id,
        name,
        content,
        content_type,
        incomplete,
    }
}
