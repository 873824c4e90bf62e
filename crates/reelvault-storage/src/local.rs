use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use reelvault_core::StorageBackend;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Presigned URLs degrade to the durable public URL; local deployments have
/// no signing authority, and the files are served statically anyway.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
    bucket: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/reelvault/media")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:4000/media")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let bucket = base_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "local".to_string());

        Ok(LocalStorage {
            base_path,
            base_url,
            bucket,
        })
    }

    /// Convert a storage key to a filesystem path with security validation
    ///
    /// Rejects keys containing path traversal sequences that could escape
    /// the base storage directory.
    fn key_to_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.contains("..") || key.starts_with('/') {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write into a sibling temp file, fsync, then rename over the final
    /// path. Readers never observe a partially written object.
    async fn write_atomic(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        self.ensure_parent_dir(path).await?;

        let tmp_path = path.with_extension("partial");

        let mut file = fs::File::create(&tmp_path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        if let Err(e) = async {
            file.write_all(data).await?;
            file.sync_all().await
        }
        .await
        {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                tmp_path.display(),
                e
            )));
        }

        fs::rename(&tmp_path, path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to finalize file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put_object(&self, key: &str, _content_type: &str, data: Bytes) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();

        let start = std::time::Instant::now();
        self.write_atomic(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn put_object_from_path(
        &self,
        key: &str,
        _content_type: &str,
        source: &Path,
    ) -> StorageResult<u64> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let tmp_path = path.with_extension("partial");
        let size = match fs::copy(source, &tmp_path).await {
            Ok(size) => size,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StorageError::UploadFailed(format!(
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    tmp_path.display(),
                    e
                )));
            }
        };

        fs::rename(&tmp_path, &path).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to finalize file {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(size)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(());
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn presigned_get_url(&self, key: &str, _expires_in: Duration) -> StorageResult<String> {
        self.key_to_path(key)?;
        Ok(self.public_url(key))
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), key)
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const BASE_URL: &str = "http://localhost:4000/media";

    #[tokio::test]
    async fn test_put_and_exists() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), BASE_URL.to_string())
            .await
            .unwrap();

        storage
            .put_object(
                "landscape/abc.mp4",
                "video/mp4",
                Bytes::from_static(b"payload"),
            )
            .await
            .unwrap();

        assert!(storage.exists("landscape/abc.mp4").await.unwrap());
        assert!(!storage.exists("landscape/missing.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_put_from_path() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("store"), BASE_URL.to_string())
            .await
            .unwrap();

        let source = dir.path().join("input.mp4");
        tokio::fs::write(&source, b"remuxed bytes").await.unwrap();

        let size = storage
            .put_object_from_path("portrait/xyz.mp4", "video/mp4", &source)
            .await
            .unwrap();

        assert_eq!(size, 13);
        assert!(storage.exists("portrait/xyz.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), BASE_URL.to_string())
            .await
            .unwrap();

        let result = storage
            .put_object("../../../etc/passwd", "video/mp4", Bytes::new())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_ok() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), BASE_URL.to_string())
            .await
            .unwrap();

        assert!(storage.delete("other/missing.mp4").await.is_ok());
    }

    #[tokio::test]
    async fn test_public_url() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), format!("{}/", BASE_URL))
            .await
            .unwrap();

        assert_eq!(
            storage.public_url("landscape/abc.mp4"),
            "http://localhost:4000/media/landscape/abc.mp4"
        );
    }

    #[tokio::test]
    async fn test_presigned_degrades_to_public_url() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), BASE_URL.to_string())
            .await
            .unwrap();

        let url = storage
            .presigned_get_url("landscape/abc.mp4", Duration::from_secs(600))
            .await
            .unwrap();
        assert_eq!(url, storage.public_url("landscape/abc.mp4"));
    }
}
