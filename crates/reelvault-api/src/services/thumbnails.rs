//! Thumbnail persistence strategies.
//!
//! A thumbnail lands in one of three places depending on configuration:
//! a file under the public assets root, a `data:` URL inlined into the
//! record, or an in-memory cache served from `/thumbnails/{video_id}`.
//! All three produce a URL the record stores; the record never knows which
//! strategy is active.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use bytes::Bytes;
use reelvault_core::{AppError, Config, ThumbnailStrategy};
use reelvault_storage::{generate_asset_name, LocalStorage, Storage, StorageResult};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A cached thumbnail with its original media type.
#[derive(Debug, Clone)]
pub struct StoredThumbnail {
    pub media_type: String,
    pub data: Bytes,
}

/// Thumbnail persistence seam.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Persist thumbnail bytes for a video and return the URL to store on
    /// the record. Re-uploading replaces the previous thumbnail.
    async fn store(
        &self,
        video_id: Uuid,
        media_type: &str,
        data: Bytes,
    ) -> Result<String, AppError>;

    /// Fetch cached bytes for the serve endpoint. Only the in-memory
    /// strategy has anything to return; the others serve via URL.
    async fn get(&self, video_id: Uuid) -> Option<StoredThumbnail>;
}

/// File extension for an allowed thumbnail media type.
pub fn extension_for(media_type: &str) -> Option<&'static str> {
    match media_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        "image/gif" => Some(".gif"),
        "image/webp" => Some(".webp"),
        _ => None,
    }
}

/// Writes thumbnails under the public assets root.
///
/// Filenames are random so a replaced thumbnail gets a new URL and stale
/// CDN/browser caches never serve the old image.
pub struct DiskThumbnailStore {
    storage: LocalStorage,
}

impl DiskThumbnailStore {
    /// Creates the assets root if missing. Writes go through the same
    /// atomic local-storage put as media objects.
    pub async fn new(assets_root: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let storage = LocalStorage::new(assets_root, base_url).await?;
        Ok(Self { storage })
    }
}

#[async_trait]
impl ThumbnailStore for DiskThumbnailStore {
    async fn store(
        &self,
        video_id: Uuid,
        media_type: &str,
        data: Bytes,
    ) -> Result<String, AppError> {
        let extension = extension_for(media_type).ok_or_else(|| {
            AppError::InvalidInput(format!("Unsupported thumbnail type: {}", media_type))
        })?;

        let filename = generate_asset_name(extension);
        let size_bytes = data.len();

        self.storage
            .put_object(&filename, media_type, data)
            .await
            .map_err(|e| AppError::Internal(format!("Thumbnail write failed: {}", e)))?;

        tracing::info!(
            video_id = %video_id,
            filename = %filename,
            size_bytes,
            "Thumbnail written to assets root"
        );

        Ok(self.storage.public_url(&filename))
    }

    async fn get(&self, _video_id: Uuid) -> Option<StoredThumbnail> {
        None
    }
}

/// Encodes the thumbnail into a `data:` URL stored directly on the record.
/// No serving infrastructure needed; the database carries the image.
pub struct InlineThumbnailStore;

#[async_trait]
impl ThumbnailStore for InlineThumbnailStore {
    async fn store(
        &self,
        _video_id: Uuid,
        media_type: &str,
        data: Bytes,
    ) -> Result<String, AppError> {
        if extension_for(media_type).is_none() {
            return Err(AppError::InvalidInput(format!(
                "Unsupported thumbnail type: {}",
                media_type
            )));
        }

        Ok(format!(
            "data:{};base64,{}",
            media_type,
            BASE64_STANDARD.encode(&data)
        ))
    }

    async fn get(&self, _video_id: Uuid) -> Option<StoredThumbnail> {
        None
    }
}

/// Keeps thumbnails in a process-wide keyed cache, served from
/// `/thumbnails/{video_id}`. Contents do not survive a restart.
pub struct MemoryThumbnailStore {
    entries: Arc<RwLock<HashMap<Uuid, StoredThumbnail>>>,
    base_url: String,
}

impl MemoryThumbnailStore {
    pub fn new(base_url: String) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            base_url,
        }
    }
}

#[async_trait]
impl ThumbnailStore for MemoryThumbnailStore {
    async fn store(
        &self,
        video_id: Uuid,
        media_type: &str,
        data: Bytes,
    ) -> Result<String, AppError> {
        if extension_for(media_type).is_none() {
            return Err(AppError::InvalidInput(format!(
                "Unsupported thumbnail type: {}",
                media_type
            )));
        }

        self.entries.write().await.insert(
            video_id,
            StoredThumbnail {
                media_type: media_type.to_string(),
                data,
            },
        );

        Ok(format!(
            "{}/thumbnails/{}",
            self.base_url.trim_end_matches('/'),
            video_id
        ))
    }

    async fn get(&self, video_id: Uuid) -> Option<StoredThumbnail> {
        self.entries.read().await.get(&video_id).cloned()
    }
}

/// Create the thumbnail store selected by configuration.
pub async fn create_thumbnail_store(config: &Config) -> StorageResult<Arc<dyn ThumbnailStore>> {
    Ok(match config.thumbnail_strategy() {
        ThumbnailStrategy::Disk => Arc::new(
            DiskThumbnailStore::new(config.assets_root(), config.assets_base_url().to_string())
                .await?,
        ),
        ThumbnailStrategy::Inline => Arc::new(InlineThumbnailStore),
        ThumbnailStrategy::Memory => Arc::new(MemoryThumbnailStore::new(
            config.public_base_url().to_string(),
        )),
    })
}
