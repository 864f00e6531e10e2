//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Anything that
//! converts into `AppError` converts into `HttpAppError` and renders with the
//! same status, body and log level.

use assetvault_core::{AppError, ErrorMetadata, LogLevel};
use assetvault_db::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl ErrorResponse {
    fn from_app_error(error: &AppError, expose_details: bool) -> Self {
        Self {
            error: error.client_message(),
            details: expose_details.then(|| error.detailed_message()),
            error_type: expose_details.then(|| error.error_type().to_string()),
            code: error.error_code().to_string(),
            recoverable: error.is_recoverable(),
            suggested_action: error.suggested_action().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from assetvault-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

impl From<StoreError> for HttpAppError {
    fn from(err: StoreError) -> Self {
        HttpAppError(AppError::from(err))
    }
}

/// Convert JSON body deserialization failures into a 400 with our ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON) on deserialization failure.
/// Use this instead of `Json<T>` when you want a consistent API error shape for invalid bodies.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Error occurred");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Details never leave the process in production or for sensitive errors.
        let expose_details = !is_production_env() && !app_error.is_sensitive();
        let body = ErrorResponse::from_app_error(app_error, expose_details);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error_unavailable() {
        let HttpAppError(app_err) = StoreError::Unavailable("pool timed out".to_string()).into();
        match app_err {
            AppError::StoreUnavailable(msg) => assert_eq!(msg, "pool timed out"),
            _ => panic!("Expected StoreUnavailable variant"),
        }
    }

    #[test]
    fn test_from_store_error_write_rejected() {
        let HttpAppError(app_err) = StoreError::WriteRejected("constraint".to_string()).into();
        assert!(matches!(app_err, AppError::WriteRejected(_)));
        assert_eq!(app_err.http_status_code(), 500);
    }

    #[test]
    fn test_store_unavailable_renders_503() {
        let response =
            HttpAppError(AppError::StoreUnavailable("down".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_bad_request_renders_400() {
        let response = HttpAppError(AppError::BadRequest("too many".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_sensitive_error_hides_details() {
        let err = AppError::StoreUnavailable("postgres://user:secret@db".to_string());
        let body = ErrorResponse::from_app_error(&err, false);
        assert_eq!(body.error, "Document store is unavailable");
        assert!(body.details.is_none());
        assert!(body.error_type.is_none());
        assert_eq!(body.code, "STORE_UNAVAILABLE");
        assert!(body.recoverable);
    }

    /// Verifies the public error response contract: serialized ErrorResponse has "error",
    /// "code", "recoverable", and optionally "details" / "error_type" / "suggested_action".
    #[test]
    fn test_error_response_shape() {
        let err = AppError::InvalidInput("bad body".to_string());
        let json = serde_json::to_value(ErrorResponse::from_app_error(&err, true)).unwrap();
        assert_eq!(json["error"], "bad body");
        assert_eq!(json["code"], "INVALID_INPUT");
        assert_eq!(json["recoverable"], false);
        assert_eq!(json["error_type"], "InvalidInput");
        assert!(json["details"].as_str().unwrap().contains("bad body"));
        assert!(json["suggested_action"].is_string());
    }
}
