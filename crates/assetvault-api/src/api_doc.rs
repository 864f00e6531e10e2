//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use assetvault_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assetvault API",
        version = "0.1.0",
        description = "Batch ingestion and retrieval of game assets: sprite images, audio clips and player scores. All endpoints are versioned under /api/v0/."
    ),
    paths(
        // Sprites
        handlers::upload::upload_sprites,
        handlers::list::list_sprites,
        // Audio
        handlers::upload::upload_audio,
        handlers::list::list_audio,
        // Scores
        handlers::upload::submit_scores,
        handlers::list::list_scores,
    ),
    components(schemas(
        handlers::IngestResponse,
        error::ErrorResponse,
        models::AssetKind,
        models::ScoreInput,
        models::DocumentId,
        models::RejectedItem,
        models::RejectionReason,
        models::BinaryRecord,
        models::ScoreRecord,
        models::StoredRecord,
    )),
    tags(
        (name = "sprites", description = "Sprite image batches"),
        (name = "audio", description = "Audio clip batches"),
        (name = "scores", description = "Player score batches")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_asset_route() {
        let spec = ApiDoc::openapi();
        for path in ["/api/v0/sprites", "/api/v0/audio", "/api/v0/scores"] {
            assert!(spec.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
