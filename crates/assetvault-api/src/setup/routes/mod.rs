//! Route configuration and setup.
//!
//! Asset routes are nested under [`API_PREFIX`]; health checks live in [health](health).

mod health;

use crate::api_doc::ApiDoc;
use crate::constants::{API_PREFIX, OPENAPI_PATH};
use crate::handlers::{list, upload};
use crate::state::AppState;
use assetvault_core::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;

    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);
    let max_body_bytes = config.max_request_body_bytes();
    tracing::info!(
        http_concurrency_limit,
        max_body_bytes,
        "HTTP limit layers enabled"
    );

    let app = Router::new()
        .merge(health_routes())
        .nest(API_PREFIX, asset_routes())
        .route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn asset_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/sprites",
            get(list::list_sprites).post(upload::upload_sprites),
        )
        .route("/audio", get(list::list_audio).post(upload::upload_audio))
        .route("/scores", get(list::list_scores).post(upload::submit_scores))
}

fn health_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins()
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
