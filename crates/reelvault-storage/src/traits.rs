//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use reelvault_core::StorageBackend;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// The upload pipeline and URL resolver work against this trait without
/// coupling to specific implementation details.
///
/// **Key format:** Keys are orientation-scoped: `{orientation}/{id}.mp4`.
/// See the crate root documentation.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload an in-memory object to a storage key with the given content
    /// type. The put is atomic: a failed call leaves no partial object
    /// behind.
    async fn put_object(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()>;

    /// Upload a file from the local filesystem to a storage key.
    ///
    /// Used for large processed media so the pipeline never has to hold a
    /// whole video in memory. Returns the number of bytes uploaded.
    async fn put_object_from_path(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<u64>;

    /// Delete an object by its storage key. Deleting an absent key is not
    /// an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check if an object exists
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Generate a presigned/temporary URL for direct GET access
    ///
    /// This is how signed-mode deployments hand clients time-limited access
    /// without proxying the bytes through the application server.
    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    /// Durable public URL for an object, valid as long as the object exists
    fn public_url(&self, key: &str) -> String;

    /// The bucket (or bucket-equivalent namespace) objects are written to
    fn bucket(&self) -> &str;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
