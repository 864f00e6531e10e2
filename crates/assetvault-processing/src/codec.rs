//! Data-URI codec for binary payloads.
//!
//! Stored binary content is always `data:<mime>;base64,<payload>` with the
//! standard, padded base64 alphabet.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

/// MIME type used when neither the declared type nor the extension tells us anything.
pub const DEFAULT_MIME: &str = "application/octet-stream";

const DATA_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("Malformed content: {0}")]
    MalformedContent(String),
}

/// Result of [`encode`]: the data-URI and the MIME type embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAsset {
    pub content: String,
    pub mime: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedContent {
    pub bytes: Vec<u8>,
    pub mime: String,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$&^_.+-".contains(c)
}

/// Normalize a content type to a bare lowercase `type/subtype`.
///
/// Parameters after `;` are dropped. Returns `None` unless exactly one `/`
/// separates two non-empty tokens.
pub fn normalize_mime(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let (kind, subtype) = essence.split_once('/')?;
    if kind.is_empty()
        || subtype.is_empty()
        || !kind.chars().all(is_token_char)
        || !subtype.chars().all(is_token_char)
    {
        return None;
    }
    Some(essence.to_lowercase())
}

/// Infer a MIME type from the file extension.
pub fn mime_from_extension(filename: &str) -> Option<&'static str> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())?;

    let mime = match extension.as_str() {
        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        "webm" => "audio/webm",
        _ => return None,
    };
    Some(mime)
}

/// Declared type if well-formed, else the extension's type, else [`DEFAULT_MIME`].
pub fn resolve_mime(declared_content_type: Option<&str>, filename: &str) -> String {
    declared_content_type
        .and_then(normalize_mime)
        .or_else(|| mime_from_extension(filename).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_MIME.to_string())
}

/// Build a data-URI for `bytes` with an already resolved MIME type.
pub fn encode_with_mime(bytes: &[u8], mime: &str) -> String {
    format!("{DATA_PREFIX}{mime}{BASE64_MARKER},{}", STANDARD.encode(bytes))
}

/// Encode a binary payload as a data-URI. Total for any input.
pub fn encode(
    bytes: &[u8],
    declared_content_type: Option<&str>,
    filename: &str,
) -> EncodedAsset {
    let mime = resolve_mime(declared_content_type, filename);
    EncodedAsset {
        content: encode_with_mime(bytes, &mime),
        mime,
    }
}

/// Decode a bare base64 string (no data-URI header).
pub fn decode_base64(payload: &str) -> Result<Vec<u8>, CodecError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| CodecError::MalformedContent(format!("invalid base64 payload: {}", e)))
}

/// Split a data-URI into its bytes and MIME type.
pub fn decode(content: &str) -> Result<DecodedContent, CodecError> {
    let rest = content
        .strip_prefix(DATA_PREFIX)
        .ok_or_else(|| CodecError::MalformedContent("missing 'data:' prefix".to_string()))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| CodecError::MalformedContent("missing ',' separator".to_string()))?;

    let mime_part = header.strip_suffix(BASE64_MARKER).ok_or_else(|| {
        CodecError::MalformedContent("payload is not marked as base64".to_string())
    })?;

    let mime = normalize_mime(mime_part).ok_or_else(|| {
        CodecError::MalformedContent(format!("invalid MIME type '{}'", mime_part))
    })?;

    let bytes = decode_base64(payload)?;
    Ok(DecodedContent { bytes, mime })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uses_declared_type() {
        let encoded = encode(&[0u8; 10], Some("image/png"), "whatever.bin");
        assert_eq!(encoded.mime, "image/png");
        assert!(encoded.content.starts_with("data:image/png;base64,"));

        let decoded = decode(&encoded.content).unwrap();
        assert_eq!(decoded.bytes, vec![0u8; 10]);
        assert_eq!(decoded.mime, "image/png");
    }

    #[test]
    fn test_round_trip_arbitrary_bytes() {
        let payloads: [&[u8]; 4] = [b"a", b"\x00\xff\x10", b"hello world!", &[7u8; 1025]];
        for bytes in payloads {
            let encoded = encode(bytes, Some("audio/wav"), "clip.wav");
            assert_eq!(decode(&encoded.content).unwrap().bytes, bytes);
        }
    }

    #[test]
    fn test_declared_type_parameters_are_stripped() {
        assert_eq!(
            resolve_mime(Some("Image/PNG; charset=binary"), "x"),
            "image/png"
        );
    }

    #[test]
    fn test_malformed_declared_type_falls_back_to_extension() {
        assert_eq!(resolve_mime(Some("png"), "cat.PNG"), "image/png");
        assert_eq!(resolve_mime(Some("image/"), "meow.mp3"), "audio/mpeg");
        assert_eq!(resolve_mime(None, "meow.ogg"), "audio/ogg");
    }

    #[test]
    fn test_unknown_type_defaults_to_octet_stream() {
        assert_eq!(resolve_mime(None, "blob"), DEFAULT_MIME);
        assert_eq!(resolve_mime(Some("a/b/c"), "blob.xyz"), DEFAULT_MIME);
    }

    #[test]
    fn test_decode_rejects_missing_prefix() {
        assert!(matches!(
            decode("image/png;base64,AAAA"),
            Err(CodecError::MalformedContent(_))
        ));
    }

    #[test]
    fn test_decode_rejects_non_base64_marker() {
        assert!(decode("data:text/plain,hello").is_err());
        assert!(decode("data:image/png;base64").is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_payload() {
        assert!(decode("data:image/png;base64,@@not-base64@@").is_err());
    }

    #[test]
    fn test_decode_rejects_invalid_mime() {
        assert!(decode("data:png;base64,AAAA").is_err());
    }

    #[test]
    fn test_decode_base64_ignores_line_breaks() {
        assert_eq!(decode_base64("aGVs\nbG8=").unwrap(), b"hello");
    }
}
