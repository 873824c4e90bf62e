//! Route configuration and setup.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use reelvault_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Extra room for multipart boundaries and metadata fields on top of the
/// media size limit, which the spool enforces exactly.
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route(
            "/api/videos",
            post(handlers::videos::create_video).get(handlers::videos::list_videos),
        )
        .route("/api/videos/{video_id}", get(handlers::videos::get_video))
        .route(
            "/api/videos/{video_id}/upload",
            post(handlers::video_upload::upload_video),
        )
        .route(
            "/api/videos/{video_id}/thumbnail",
            post(handlers::thumbnails::upload_thumbnail),
        )
        .route(
            "/thumbnails/{video_id}",
            get(handlers::thumbnails::get_thumbnail),
        )
        .route("/healthz", get(handlers::health::healthz))
        .route(
            "/api/openapi.json",
            get(|| async { Json(crate::api_doc::get_openapi_spec()) }),
        )
        .nest_service("/assets", ServeDir::new(config.assets_root()))
        .layer(RequestBodyLimitLayer::new(
            config.max_video_size_bytes() + BODY_OVERHEAD_BYTES,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins().contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins: Result<Vec<HeaderValue>, _> =
            config.cors_origins().iter().map(|o| o.parse()).collect();
        CorsLayer::new()
            .allow_origin(origins.unwrap_or_default())
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
