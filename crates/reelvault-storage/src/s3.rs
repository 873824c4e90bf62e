use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::signer::Signer;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutMultipartOpts, PutOptions, PutPayload,
    Result as ObjectResult, WriteMultipart,
};
use reelvault_core::StorageBackend;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncReadExt;

/// Chunk size for multipart uploads of spooled files.
const MULTIPART_CHUNK_SIZE: usize = 8 * 1024 * 1024;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    fn content_type_attributes(content_type: &str) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        attributes
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn put_object(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        let size = data.len() as u64;
        let location = ObjectPath::from(key.to_string());
        let opts = PutOptions {
            attributes: Self::content_type_attributes(content_type),
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), opts)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    async fn put_object_from_path(
        &self,
        key: &str,
        content_type: &str,
        path: &Path,
    ) -> StorageResult<u64> {
        let location = ObjectPath::from(key.to_string());
        let opts = PutMultipartOpts {
            attributes: Self::content_type_attributes(content_type),
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let mut file = tokio::fs::File::open(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;

        // Multipart keeps memory bounded regardless of the file size. An
        // aborted upload leaves no visible object behind.
        let upload = self
            .store
            .put_multipart_opts(&location, opts)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        let mut writer = WriteMultipart::new(upload);

        let mut buf = vec![0u8; MULTIPART_CHUNK_SIZE];
        let mut total: u64 = 0;
        loop {
            let n = file.read(&mut buf).await.map_err(|e| {
                StorageError::UploadFailed(format!("Failed to read {}: {}", path.display(), e))
            })?;
            if n == 0 {
                break;
            }
            total += n as u64;
            writer
                .wait_for_capacity(8)
                .await
                .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
            writer.write(&buf[..n]);
        }

        writer.finish().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = total,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 multipart upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = total,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 multipart upload successful"
        );

        Ok(total)
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = ObjectPath::from(key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(_) | Err(ObjectStoreError::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete failed"
                );
                return Err(StorageError::DeleteFailed(e.to_string()));
            }
        }

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 delete successful"
        );

        Ok(())
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        let location = ObjectPath::from(key.to_string());
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    async fn presigned_get_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        let location = ObjectPath::from(key.to_string());
        let url_result: ObjectResult<_> = self
            .store
            .signed_url(Method::GET, &location, expires_in)
            .await;

        let url = url_result
            .map_err(|e| StorageError::BackendError(e.to_string()))?
            .to_string();

        Ok(url)
    }

    /// Generate public URL for an S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style with the endpoint URL
    fn public_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
