//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use std::time::Duration;

/// Liveness: the process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness: the document store answers.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    const TIMEOUT: Duration = Duration::from_secs(5);

    let (status_code, store) = match tokio::time::timeout(TIMEOUT, state.store.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, "ready".to_string()),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Store readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, format!("not_ready: {}", e))
        }
        Err(_) => {
            tracing::error!("Store readiness check timed out");
            (StatusCode::SERVICE_UNAVAILABLE, "timeout".to_string())
        }
    };

    let status = if status_code == StatusCode::OK {
        "ready"
    } else {
        "not_ready"
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "store": store,
            "backend": state.config.store_backend().to_string(),
        })),
    )
}
