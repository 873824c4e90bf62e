//! Application wiring: configuration to a runnable router.

pub mod routes;
pub mod server;

use crate::auth::JwtService;
use crate::services::thumbnails::create_thumbnail_store;
use crate::state::AppState;
use axum::Router;
use reelvault_core::Config;
use reelvault_db::{create_pool, PgVideoRepository, MIGRATOR};
use reelvault_processing::{FfmpegRemuxer, FfprobeProber};
use reelvault_storage::{create_storage, UrlResolver};
use std::sync::Arc;
use std::time::Duration;

/// Build the application state and router from configuration.
///
/// Connects to the database, applies migrations, and constructs the
/// storage backend, processing tools, and thumbnail store.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = create_pool(&config).await?;
    MIGRATOR.run(&pool).await?;
    tracing::info!("Database migrations applied");

    let storage = create_storage(&config).await?;
    tracing::info!(backend = %config.storage_backend(), "Storage backend ready");

    let resolver = UrlResolver::new(
        storage.clone(),
        config.url_mode(),
        Duration::from_secs(config.signed_url_expiry_secs()),
    );

    let tool_timeout = Duration::from_secs(config.tool_timeout_secs());

    let state = Arc::new(AppState {
        videos: Arc::new(PgVideoRepository::new(pool)),
        storage,
        prober: Arc::new(FfprobeProber::new(
            config.ffprobe_path().to_string(),
            tool_timeout,
        )),
        remuxer: Arc::new(FfmpegRemuxer::new(
            config.ffmpeg_path().to_string(),
            tool_timeout,
        )),
        thumbnails: create_thumbnail_store(&config).await?,
        resolver,
        jwt: JwtService::new(config.jwt_secret()),
        config: config.clone(),
    });

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
