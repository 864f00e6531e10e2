use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::handlers::IngestResponse;
use crate::state::AppState;
use crate::utils::upload::{ensure_batch_size, extract_multipart_files};
use assetvault_core::models::{AssetKind, ScoreInput};
use assetvault_core::AppError;
use assetvault_processing::IngestBatch;
use axum::extract::{Multipart, State};
use std::sync::Arc;

async fn upload_binary_batch(
    state: &AppState,
    kind: AssetKind,
    multipart: Multipart,
    message: &str,
) -> Result<IngestResponse, HttpAppError> {
    let max_items = state.config.limits().max_batch_items;
    let items = extract_multipart_files(multipart, max_items).await?;

    let batch = IngestBatch::uploads(kind, items).ok_or_else(|| {
        AppError::Internal(format!("{} is not a binary asset kind", kind))
    })?;
    let outcome = state.ingestor.ingest(batch).await?;

    Ok(IngestResponse::new(message, outcome))
}

#[utoipa::path(
    post,
    path = "/api/v0/sprites",
    tag = "sprites",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "At least one sprite stored", body = IngestResponse),
        (status = 200, description = "Nothing stored (empty or fully rejected batch)", body = IngestResponse),
        (status = 400, description = "Malformed multipart body or too many files", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_sprites"))]
pub async fn upload_sprites(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<IngestResponse, HttpAppError> {
    upload_binary_batch(&state, AssetKind::Sprite, multipart, "Sprites uploaded").await
}

#[utoipa::path(
    post,
    path = "/api/v0/audio",
    tag = "audio",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "At least one clip stored", body = IngestResponse),
        (status = 200, description = "Nothing stored (empty or fully rejected batch)", body = IngestResponse),
        (status = 400, description = "Malformed multipart body or too many files", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_audio"))]
pub async fn upload_audio(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<IngestResponse, HttpAppError> {
    upload_binary_batch(&state, AssetKind::Audio, multipart, "Audio uploaded").await
}

#[utoipa::path(
    post,
    path = "/api/v0/scores",
    tag = "scores",
    request_body = Vec<ScoreInput>,
    responses(
        (status = 201, description = "At least one score stored", body = IngestResponse),
        (status = 200, description = "Nothing stored (empty or fully rejected batch)", body = IngestResponse),
        (status = 400, description = "Body is not a JSON array, or too many scores", body = ErrorResponse),
        (status = 503, description = "Document store unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, entries), fields(operation = "submit_scores", items = entries.len()))]
pub async fn submit_scores(
    State(state): State<Arc<AppState>>,
    ValidatedJson(entries): ValidatedJson<Vec<serde_json::Value>>,
) -> Result<IngestResponse, HttpAppError> {
    ensure_batch_size(entries.len(), state.config.limits().max_batch_items)?;

    // Entries are read one by one so a bad entry is rejected, not the request.
    let scores = entries.iter().map(ScoreInput::from_json).collect();
    let outcome = state.ingestor.ingest(IngestBatch::Scores(scores)).await?;
    Ok(IngestResponse::new("Multiple scores submitted", outcome))
}
