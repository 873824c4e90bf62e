//! Media URL resolution.
//!
//! Deployments run in one of two modes. In static mode the public URL is
//! persisted at ingestion time and returned verbatim. In signed mode only an
//! opaque (bucket, key) reference is persisted and a short-lived URL is
//! minted on every read, so stored references never go stale.

use crate::traits::{Storage, StorageResult};
use reelvault_core::{MediaReference, UrlMode};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct UrlResolver {
    storage: Arc<dyn Storage>,
    mode: UrlMode,
    expiry: Duration,
}

impl UrlResolver {
    pub fn new(storage: Arc<dyn Storage>, mode: UrlMode, expiry: Duration) -> Self {
        UrlResolver {
            storage,
            mode,
            expiry,
        }
    }

    pub fn mode(&self) -> UrlMode {
        self.mode
    }

    /// The reference to persist for a freshly uploaded object.
    pub fn reference_for(&self, key: &str) -> MediaReference {
        match self.mode {
            UrlMode::Static => MediaReference::url(self.storage.public_url(key)),
            UrlMode::Signed => MediaReference::stored(self.storage.bucket(), key),
        }
    }

    /// Resolve a persisted reference to a client-usable URL.
    ///
    /// Records with no media yet resolve to `None`; that is not an error.
    /// Stored references mint a fresh signed URL on every call.
    pub async fn resolve(
        &self,
        reference: Option<&MediaReference>,
    ) -> StorageResult<Option<String>> {
        match reference {
            None => Ok(None),
            Some(MediaReference::Url(url)) => Ok(Some(url.clone())),
            Some(MediaReference::Stored { key, .. }) => {
                let url = self.storage.presigned_get_url(key, self.expiry).await?;
                Ok(Some(url))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalStorage;
    use tempfile::tempdir;

    const EXPIRY: Duration = Duration::from_secs(600);

    async fn local_resolver(mode: UrlMode) -> (tempfile::TempDir, UrlResolver) {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:4000/media".to_string())
            .await
            .unwrap();
        let resolver = UrlResolver::new(Arc::new(storage), mode, EXPIRY);
        (dir, resolver)
    }

    #[tokio::test]
    async fn test_absent_reference_resolves_to_none() {
        let (_dir, resolver) = local_resolver(UrlMode::Signed).await;
        assert_eq!(resolver.resolve(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_url_reference_returned_verbatim() {
        let (_dir, resolver) = local_resolver(UrlMode::Static).await;
        let reference = MediaReference::url("https://cdn.example.com/landscape/a.mp4");
        assert_eq!(
            resolver.resolve(Some(&reference)).await.unwrap(),
            Some("https://cdn.example.com/landscape/a.mp4".to_string())
        );
    }

    #[tokio::test]
    async fn test_static_mode_persists_public_url() {
        let (_dir, resolver) = local_resolver(UrlMode::Static).await;
        match resolver.reference_for("landscape/a.mp4") {
            MediaReference::Url(url) => {
                assert_eq!(url, "http://localhost:4000/media/landscape/a.mp4")
            }
            other => panic!("Expected Url, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signed_mode_persists_opaque_reference() {
        let (_dir, resolver) = local_resolver(UrlMode::Signed).await;
        match resolver.reference_for("landscape/a.mp4") {
            MediaReference::Stored { key, .. } => assert_eq!(key, "landscape/a.mp4"),
            other => panic!("Expected Stored, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_stored_reference_resolves_through_backend() {
        let (_dir, resolver) = local_resolver(UrlMode::Signed).await;
        let reference = MediaReference::stored("bucket", "landscape/a.mp4");
        let url = resolver.resolve(Some(&reference)).await.unwrap().unwrap();
        assert_eq!(url, "http://localhost:4000/media/landscape/a.mp4");
    }
}
