//! Error types module
//!
//! This module provides the whole-request error type used throughout assetvault.
//! Per-item rejections inside a batch are not errors; they are reported through
//! [`RejectionReason`](crate::models::RejectionReason). `AppError` covers what
//! fails a call as a unit: store outages, refused writes, malformed requests.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like malformed requests
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Document store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Document store rejected write: {0}")]
    WriteRejected(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::StoreUnavailable(_) => (
            503,
            "STORE_UNAVAILABLE",
            true,
            Some("Retry the whole batch after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::WriteRejected(_) => (
            500,
            "WRITE_REJECTED",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::BadRequest(_) => (
            400,
            "BAD_REQUEST",
            false,
            Some("Check request format and parameters"),
            false,
            LogLevel::Debug,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::WriteRejected(_) => "WriteRejected",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::StoreUnavailable(_) => "Document store is unavailable".to_string(),
            AppError::WriteRejected(_) => "Document store refused the batch".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_store_unavailable() {
        let err = AppError::StoreUnavailable("pool timed out".to_string());
        assert_eq!(err.http_status_code(), 503);
        assert_eq!(err.error_code(), "STORE_UNAVAILABLE");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Document store is unavailable");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_invalid_input() {
        let err = AppError::InvalidInput("bad body".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "bad body");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("root cause").context("outer"));
        let details = err.detailed_message();
        assert!(details.starts_with("Internal error with source"));
        assert!(details.contains("Caused by: outer"));
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err = AppError::WriteRejected("duplicate key".to_string());
        assert_eq!(
            err.suggested_action(),
            Some("Contact support if this error persists")
        );
        assert_eq!(err.error_type(), "WriteRejected");
    }
}
