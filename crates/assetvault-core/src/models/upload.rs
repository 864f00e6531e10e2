use serde::Serialize;
use utoipa::ToSchema;

/// One binary item of an inbound sprite or audio batch.
#[derive(Debug, Clone)]
pub struct RawUploadItem {
    pub filename: String,
    pub content: Vec<u8>,
    /// Content type as sent by the client, if any. Not trusted until resolved by the codec.
    pub declared_content_type: Option<String>,
}

impl RawUploadItem {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
        declared_content_type: Option<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            declared_content_type,
        }
    }
}

/// One entry of an inbound score batch.
///
/// Each element of the request array is read on its own, so one unusable
/// entry cannot fail its siblings. Fields the element does not carry in a
/// usable form are `None` and rejected later by the score validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScoreInput {
    #[schema(example = "John")]
    pub player_name: Option<String>,
    #[schema(example = 4500)]
    pub score: Option<i64>,
}

impl ScoreInput {
    pub fn new(player_name: impl Into<String>, score: i64) -> Self {
        Self {
            player_name: Some(player_name.into()),
            score: Some(score),
        }
    }

    /// Reads one array element. `playerName` is accepted for the name; the
    /// score must be an integer that fits in an `i64`.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let player_name = ["player_name", "playerName"]
            .iter()
            .find_map(|key| value.get(key).and_then(serde_json::Value::as_str))
            .map(str::to_string);
        let score = value.get("score").and_then(serde_json::Value::as_i64);

        Self { player_name, score }
    }
}
