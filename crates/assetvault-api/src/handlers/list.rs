use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use assetvault_core::models::{AssetKind, StoredRecord};
use axum::{extract::State, Json};
use std::sync::Arc;

async fn list_kind(state: &AppState, kind: AssetKind) -> Result<Json<Vec<StoredRecord>>, HttpAppError> {
    let records = state.normalizer.read(kind).await?;
    Ok(Json(records))
}

#[utoipa::path(
    get,
    path = "/api/v0/sprites",
    tag = "sprites",
    responses(
        (status = 200, description = "Every stored sprite", body = Vec<StoredRecord>),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_sprites"))]
pub async fn list_sprites(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredRecord>>, HttpAppError> {
    list_kind(&state, AssetKind::Sprite).await
}

#[utoipa::path(
    get,
    path = "/api/v0/audio",
    tag = "audio",
    responses(
        (status = 200, description = "Every stored audio clip", body = Vec<StoredRecord>),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_audio"))]
pub async fn list_audio(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredRecord>>, HttpAppError> {
    list_kind(&state, AssetKind::Audio).await
}

#[utoipa::path(
    get,
    path = "/api/v0/scores",
    tag = "scores",
    responses(
        (status = 200, description = "Every stored score", body = Vec<StoredRecord>),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_scores"))]
pub async fn list_scores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredRecord>>, HttpAppError> {
    list_kind(&state, AssetKind::Score).await
}
