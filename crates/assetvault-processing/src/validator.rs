use assetvault_core::models::{
    AssetKind, BinaryPayload, RawUploadItem, RecordPayload, RejectionReason, ScoreInput,
    ScorePayload,
};
use assetvault_core::IngestLimits;
use regex::Regex;

use crate::codec::{self, CodecError};

/// Why one batch item failed validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File name is missing or blank")]
    MissingName,

    #[error("Empty file")]
    EmptyPayload,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("Invalid player name: {0:?}")]
    InvalidName(String),

    #[error("Player name is missing or not a string")]
    MissingPlayerName,

    #[error("Score {score} is outside the accepted range [{min}, {max}]")]
    ScoreOutOfRange { score: i64, min: i64, max: i64 },

    #[error("Score is missing or not an integer in [{min}, {max}]")]
    UnusableScore { min: i64, max: i64 },

    #[error("Malformed content: {0}")]
    MalformedContent(String),
}

impl ValidationError {
    /// Wire-level rejection reason reported back to the client.
    pub fn reason(&self) -> RejectionReason {
        match self {
            ValidationError::MissingName => RejectionReason::MissingName,
            ValidationError::EmptyPayload => RejectionReason::EmptyPayload,
            ValidationError::PayloadTooLarge { .. } => RejectionReason::PayloadTooLarge,
            ValidationError::InvalidName(_) | ValidationError::MissingPlayerName => {
                RejectionReason::InvalidName
            }
            ValidationError::ScoreOutOfRange { .. } | ValidationError::UnusableScore { .. } => {
                RejectionReason::ScoreOutOfRange
            }
            ValidationError::MalformedContent(_) => RejectionReason::MalformedContent,
        }
    }
}

impl From<CodecError> for ValidationError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::MalformedContent(msg) => ValidationError::MalformedContent(msg),
        }
    }
}

/// Per-kind validation
///
/// Implementations never touch the store and never look at sibling items, so
/// a batch may be validated in any order or in parallel.
pub trait RecordValidator: Send + Sync {
    type Input: Send + Sync;

    fn kind(&self) -> AssetKind;

    fn validate(&self, item: &Self::Input) -> Result<RecordPayload, ValidationError>;
}

fn validate_binary(
    item: &RawUploadItem,
    max_bytes: usize,
) -> Result<RecordPayload, ValidationError> {
    if item.content.is_empty() {
        return Err(ValidationError::EmptyPayload);
    }

    let name = item.filename.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    if item.content.len() > max_bytes {
        return Err(ValidationError::PayloadTooLarge {
            size: item.content.len(),
            max: max_bytes,
        });
    }

    let encoded = codec::encode(
        &item.content,
        item.declared_content_type.as_deref(),
        name,
    );

    Ok(RecordPayload::Binary(BinaryPayload {
        name: name.to_string(),
        content: encoded.content,
        content_type: encoded.mime,
    }))
}

/// Sprite images
#[derive(Debug, Clone)]
pub struct SpriteValidator {
    max_bytes: usize,
}

impl SpriteValidator {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl RecordValidator for SpriteValidator {
    type Input = RawUploadItem;

    fn kind(&self) -> AssetKind {
        AssetKind::Sprite
    }

    fn validate(&self, item: &RawUploadItem) -> Result<RecordPayload, ValidationError> {
        validate_binary(item, self.max_bytes)
    }
}

/// Audio clips
#[derive(Debug, Clone)]
pub struct AudioValidator {
    max_bytes: usize,
}

impl AudioValidator {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }
}

impl RecordValidator for AudioValidator {
    type Input = RawUploadItem;

    fn kind(&self) -> AssetKind {
        AssetKind::Audio
    }

    fn validate(&self, item: &RawUploadItem) -> Result<RecordPayload, ValidationError> {
        validate_binary(item, self.max_bytes)
    }
}

/// Player scores. Both score bounds are inclusive.
#[derive(Debug, Clone)]
pub struct ScoreValidator {
    name_pattern: Regex,
    min: i64,
    max: i64,
}

impl ScoreValidator {
    pub fn new(name_pattern: &str, min: i64, max: i64) -> Result<Self, regex::Error> {
        Ok(Self {
            name_pattern: Regex::new(name_pattern)?,
            min,
            max,
        })
    }
}

impl RecordValidator for ScoreValidator {
    type Input = ScoreInput;

    fn kind(&self) -> AssetKind {
        AssetKind::Score
    }

    fn validate(&self, item: &ScoreInput) -> Result<RecordPayload, ValidationError> {
        let player_name = item
            .player_name
            .as_deref()
            .ok_or(ValidationError::MissingPlayerName)?;
        if !self.name_pattern.is_match(player_name) {
            return Err(ValidationError::InvalidName(player_name.to_string()));
        }

        let score = item.score.ok_or(ValidationError::UnusableScore {
            min: self.min,
            max: self.max,
        })?;
        if score < self.min || score > self.max {
            return Err(ValidationError::ScoreOutOfRange {
                score,
                min: self.min,
                max: self.max,
            });
        }

        Ok(RecordPayload::Score(ScorePayload {
            player_name: player_name.to_string(),
            score,
        }))
    }
}

/// One validator per asset kind, built once from configuration.
#[derive(Debug, Clone)]
pub struct ValidatorSet {
    pub sprite: SpriteValidator,
    pub audio: AudioValidator,
    pub score: ScoreValidator,
}

impl ValidatorSet {
    pub fn from_limits(limits: &IngestLimits) -> Result<Self, anyhow::Error> {
        let score = ScoreValidator::new(
            &limits.score_name_pattern,
            limits.score_min,
            limits.score_max,
        )
        .map_err(|e| anyhow::anyhow!("Invalid score name pattern: {}", e))?;

        Ok(Self {
            sprite: SpriteValidator::new(limits.sprite_max_bytes),
            audio: AudioValidator::new(limits.audio_max_bytes),
            score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_validators() -> ValidatorSet {
        ValidatorSet::from_limits(&IngestLimits {
            sprite_max_bytes: 16,
            audio_max_bytes: 32,
            ..IngestLimits::default()
        })
        .unwrap()
    }

    fn upload(name: &str, bytes: &[u8], content_type: Option<&str>) -> RawUploadItem {
        RawUploadItem::new(name, bytes.to_vec(), content_type.map(str::to_string))
    }

    #[test]
    fn test_sprite_valid() {
        let v = test_validators();
        let payload = v
            .sprite
            .validate(&upload("cat.png", &[1u8; 10], Some("image/png")))
            .unwrap();
        match payload {
            RecordPayload::Binary(b) => {
                assert_eq!(b.name, "cat.png");
                assert_eq!(b.content_type, "image/png");
                assert!(b.content.starts_with("data:image/png;base64,"));
                assert_eq!(codec::decode(&b.content).unwrap().bytes, vec![1u8; 10]);
            }
            RecordPayload::Score(_) => panic!("Expected binary payload"),
        }
    }

    #[test]
    fn test_sprite_empty_payload() {
        let v = test_validators();
        let err = v.sprite.validate(&upload("cat.png", &[], None)).unwrap_err();
        assert_eq!(err, ValidationError::EmptyPayload);
        assert_eq!(err.reason(), RejectionReason::EmptyPayload);
    }

    #[test]
    fn test_sprite_blank_name() {
        let v = test_validators();
        let err = v.sprite.validate(&upload("   ", &[1], None)).unwrap_err();
        assert_eq!(err.reason(), RejectionReason::MissingName);
    }

    #[test]
    fn test_size_limit_is_per_kind() {
        let v = test_validators();
        let item = upload("clip.wav", &[0u8; 20], None);

        let err = v.sprite.validate(&item).unwrap_err();
        assert_eq!(err, ValidationError::PayloadTooLarge { size: 20, max: 16 });

        assert!(v.audio.validate(&item).is_ok());
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let v = test_validators();
        assert!(v.sprite.validate(&upload("a.png", &[0u8; 16], None)).is_ok());
    }

    #[test]
    fn test_audio_infers_type_from_extension() {
        let v = test_validators();
        match v.audio.validate(&upload("meow.mp3", &[9u8; 4], None)).unwrap() {
            RecordPayload::Binary(b) => assert_eq!(b.content_type, "audio/mpeg"),
            RecordPayload::Score(_) => panic!("Expected binary payload"),
        }
    }

    #[test]
    fn test_score_bounds_are_inclusive() {
        let v = test_validators();
        assert!(v.score.validate(&ScoreInput::new("John", 0)).is_ok());
        assert!(v.score.validate(&ScoreInput::new("John", 10_000)).is_ok());

        for score in [-1, 10_001] {
            let err = v.score.validate(&ScoreInput::new("John", score)).unwrap_err();
            assert_eq!(err.reason(), RejectionReason::ScoreOutOfRange);
        }
    }

    #[test]
    fn test_score_name_pattern() {
        let v = test_validators();
        assert!(v.score.validate(&ScoreInput::new("Player_1", 10)).is_ok());

        for name in ["Jane!", "", "two words", "émile"] {
            let err = v.score.validate(&ScoreInput::new(name, 10)).unwrap_err();
            assert_eq!(err.reason(), RejectionReason::InvalidName, "name {:?}", name);
        }
    }

    #[test]
    fn test_name_is_checked_before_score() {
        let v = test_validators();
        let err = v.score.validate(&ScoreInput::new("Jane!", -5)).unwrap_err();
        assert_eq!(err.reason(), RejectionReason::InvalidName);
    }

    #[test]
    fn test_missing_fields_map_to_score_reasons() {
        let v = test_validators();

        let no_name = ScoreInput {
            player_name: None,
            score: Some(10),
        };
        let err = v.score.validate(&no_name).unwrap_err();
        assert_eq!(err, ValidationError::MissingPlayerName);
        assert_eq!(err.reason(), RejectionReason::InvalidName);

        let no_score = ScoreInput {
            player_name: Some("John".to_string()),
            score: None,
        };
        let err = v.score.validate(&no_score).unwrap_err();
        assert_eq!(err.reason(), RejectionReason::ScoreOutOfRange);

        let neither = ScoreInput {
            player_name: None,
            score: None,
        };
        assert_eq!(
            v.score.validate(&neither).unwrap_err().reason(),
            RejectionReason::InvalidName
        );
    }

    #[test]
    fn test_validator_kinds() {
        let v = test_validators();
        assert_eq!(v.sprite.kind(), AssetKind::Sprite);
        assert_eq!(v.audio.kind(), AssetKind::Audio);
        assert_eq!(v.score.kind(), AssetKind::Score);
    }

    #[test]
    fn test_invalid_pattern_is_rejected_at_construction() {
        let limits = IngestLimits {
            score_name_pattern: "([".to_string(),
            ..IngestLimits::default()
        };
        assert!(ValidatorSet::from_limits(&limits).is_err());
    }

    #[test]
    fn test_codec_error_maps_to_malformed_content() {
        let err: ValidationError = CodecError::MalformedContent("bad".to_string()).into();
        assert_eq!(err.reason(), RejectionReason::MalformedContent);
    }
}
