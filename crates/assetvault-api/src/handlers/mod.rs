pub mod list;
pub mod upload;

use assetvault_core::models::{BatchOutcome, DocumentId, RejectedItem};
use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use utoipa::ToSchema;

/// Body returned by every batch upload endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestResponse {
    pub message: String,
    /// Ids of the stored records, in submission order of the accepted items
    pub inserted_ids: Vec<DocumentId>,
    /// Items that were refused, with their position in the submitted batch
    pub rejected: Vec<RejectedItem>,
}

impl IngestResponse {
    pub fn new(message: &str, outcome: BatchOutcome) -> Self {
        Self {
            message: message.to_string(),
            inserted_ids: outcome.inserted_ids,
            rejected: outcome.rejected,
        }
    }

    /// 201 once anything was written, 200 for empty or fully rejected batches.
    pub fn status(&self) -> StatusCode {
        if self.inserted_ids.is_empty() {
            StatusCode::OK
        } else {
            StatusCode::CREATED
        }
    }
}

impl IntoResponse for IngestResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
