//! Video ingestion pipeline.
//!
//! Spool to disk, probe dimensions, classify orientation, remux for
//! streaming, upload under a random orientation-prefixed key, and hand back
//! the reference to persist. Stages run sequentially for a given request;
//! concurrency comes from the server running many requests at once.
//!
//! Temp files are owned by RAII guards, so every early return cleans up
//! both the spooled original and the remuxed copy. A failure after the
//! object-store put can leave an orphaned object behind; the caller logs
//! the reference so it can be reaped out of band.

use crate::error::HttpAppError;
use bytes::Bytes;
use futures::Stream;
use reelvault_core::{MediaReference, Orientation};
use reelvault_processing::{spool_stream, MediaProber, Remuxer};
use reelvault_storage::{generate_media_key, Storage, UrlResolver};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

const VIDEO_CONTENT_TYPE: &str = "video/mp4";
const VIDEO_EXTENSION: &str = ".mp4";

#[derive(Clone)]
pub struct UploadPipeline {
    storage: Arc<dyn Storage>,
    prober: Arc<dyn MediaProber>,
    remuxer: Arc<dyn Remuxer>,
    resolver: UrlResolver,
    max_video_size_bytes: usize,
}

impl UploadPipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        prober: Arc<dyn MediaProber>,
        remuxer: Arc<dyn Remuxer>,
        resolver: UrlResolver,
        max_video_size_bytes: usize,
    ) -> Self {
        Self {
            storage,
            prober,
            remuxer,
            resolver,
            max_video_size_bytes,
        }
    }

    /// Run the full ingestion pipeline for one upload and return the media
    /// reference to persist on the video record.
    pub async fn ingest<S, E>(
        &self,
        video_id: Uuid,
        stream: S,
    ) -> Result<MediaReference, HttpAppError>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
        E: fmt::Display,
    {
        let spooled = spool_stream(stream, self.max_video_size_bytes).await?;

        let info = self.prober.probe(spooled.path()).await?;
        let orientation = Orientation::classify(info.width, info.height);

        let processed = self.remuxer.remux(spooled.path()).await?;
        drop(spooled);

        let key = generate_media_key(orientation, VIDEO_EXTENSION);
        let size_bytes = self
            .storage
            .put_object_from_path(&key, VIDEO_CONTENT_TYPE, processed.path())
            .await?;

        tracing::info!(
            video_id = %video_id,
            key = %key,
            orientation = %orientation,
            width = info.width,
            height = info.height,
            size_bytes,
            "Video ingested"
        );

        Ok(self.resolver.reference_for(&key))
    }
}
