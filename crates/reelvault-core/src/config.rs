//! Configuration module
//!
//! Environment-driven configuration for the API service: server, database,
//! object storage, URL resolution, thumbnail strategy, upload limits, and
//! external tool paths.

use std::env;

use crate::storage_types::{StorageBackend, ThumbnailStrategy, UrlMode};

const DEFAULT_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_VIDEO_SIZE_GB: usize = 10;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const SIGNED_URL_EXPIRY_SECS: u64 = 600;
const TOOL_TIMEOUT_SECS: u64 = 300;

/// Application configuration, loaded once at startup.
///
/// Fields are public so tests can build a configuration directly without
/// touching the process environment; production code goes through
/// `from_env` and the accessors.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub jwt_secret: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub url_mode: UrlMode,
    pub signed_url_expiry_secs: u64,
    pub thumbnail_strategy: ThumbnailStrategy,
    pub assets_root: String,
    pub assets_base_url: String,
    pub public_base_url: String,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
    pub video_allowed_content_types: Vec<String>,
    pub thumbnail_allowed_content_types: Vec<String>,
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub tool_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .parse::<StorageBackend>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let url_mode = env::var("URL_MODE")
            .unwrap_or_else(|_| "static".to_string())
            .parse::<UrlMode>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let thumbnail_strategy = env::var("THUMBNAIL_STRATEGY")
            .unwrap_or_else(|_| "disk".to_string())
            .parse::<ThumbnailStrategy>()
            .map_err(|e| anyhow::anyhow!(e))?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port));

        let assets_base_url = env::var("ASSETS_BASE_URL")
            .unwrap_or_else(|_| format!("{}/assets", public_base_url.trim_end_matches('/')));

        let config = Config {
            server_port,
            cors_origins,
            environment,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: env::var("S3_BUCKET").ok(),
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            local_storage_base_url: env::var("LOCAL_STORAGE_BASE_URL").ok(),
            url_mode,
            signed_url_expiry_secs: env::var("SIGNED_URL_EXPIRY_SECS")
                .unwrap_or_else(|_| SIGNED_URL_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(SIGNED_URL_EXPIRY_SECS),
            thumbnail_strategy,
            assets_root: env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".to_string()),
            assets_base_url,
            public_base_url,
            max_video_size_bytes: env::var("MAX_VIDEO_SIZE_GB")
                .unwrap_or_else(|_| MAX_VIDEO_SIZE_GB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_VIDEO_SIZE_GB)
                * 1024
                * 1024
                * 1024,
            max_thumbnail_size_bytes: env::var("MAX_THUMBNAIL_SIZE_MB")
                .unwrap_or_else(|_| MAX_THUMBNAIL_SIZE_MB.to_string())
                .parse::<usize>()
                .unwrap_or(MAX_THUMBNAIL_SIZE_MB)
                * 1024
                * 1024,
            video_allowed_content_types: env::var("VIDEO_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| "video/mp4".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .collect(),
            thumbnail_allowed_content_types: env::var("THUMBNAIL_ALLOWED_CONTENT_TYPES")
                .unwrap_or_else(|_| "image/png,image/jpeg,image/gif,image/webp".to_string())
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .collect(),
            ffmpeg_path: env::var("FFMPEG_PATH").unwrap_or_else(|_| "ffmpeg".to_string()),
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            tool_timeout_secs: env::var("TOOL_TIMEOUT_SECS")
                .unwrap_or_else(|_| TOOL_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(TOOL_TIMEOUT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_backend == StorageBackend::S3 && self.s3_bucket.is_none() {
            return Err(anyhow::anyhow!(
                "S3_BUCKET must be set when STORAGE_BACKEND is s3"
            ));
        }
        if self.storage_backend == StorageBackend::Local
            && (self.local_storage_path.is_none() || self.local_storage_base_url.is_none())
        {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set when STORAGE_BACKEND is local"
            ));
        }
        if self.max_video_size_bytes == 0 || self.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be non-zero"));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.db_timeout_seconds
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.local_storage_base_url.as_deref()
    }

    pub fn url_mode(&self) -> UrlMode {
        self.url_mode
    }

    pub fn signed_url_expiry_secs(&self) -> u64 {
        self.signed_url_expiry_secs
    }

    pub fn thumbnail_strategy(&self) -> ThumbnailStrategy {
        self.thumbnail_strategy
    }

    pub fn assets_root(&self) -> &str {
        &self.assets_root
    }

    pub fn assets_base_url(&self) -> &str {
        &self.assets_base_url
    }

    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.max_video_size_bytes
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.max_thumbnail_size_bytes
    }

    pub fn video_allowed_content_types(&self) -> &[String] {
        &self.video_allowed_content_types
    }

    pub fn thumbnail_allowed_content_types(&self) -> &[String] {
        &self.thumbnail_allowed_content_types
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.ffprobe_path
    }

    pub fn tool_timeout_secs(&self) -> u64 {
        self.tool_timeout_secs
    }
}
