//! Upload spooling.
//!
//! ffprobe and ffmpeg both need a real file path, so request bodies are
//! materialized to a temporary file before processing. The spool enforces
//! the size limit mid-stream, never after the fact, and the temp file is
//! removed when the `SpooledFile` is dropped.

use crate::error::ProcessingError;
use futures::{Stream, StreamExt};
use std::fmt;
use std::path::Path;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

/// A request body materialized to a temporary file.
///
/// The underlying file is deleted when this value is dropped, whether the
/// pipeline succeeded or not.
pub struct SpooledFile {
    inner: NamedTempFile,
    size: u64,
}

impl SpooledFile {
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl fmt::Debug for SpooledFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpooledFile")
            .field("path", &self.inner.path())
            .field("size", &self.size)
            .finish()
    }
}

/// Spool a byte stream to a temporary file, enforcing `max_bytes`.
///
/// The limit check runs on every chunk so an oversize upload is rejected
/// as soon as it crosses the limit rather than after the whole body has
/// been written to disk.
pub async fn spool_stream<S, E>(mut stream: S, max_bytes: usize) -> Result<SpooledFile, ProcessingError>
where
    S: Stream<Item = Result<bytes::Bytes, E>> + Unpin,
    E: fmt::Display,
{
    let tmp = NamedTempFile::new()?;
    let mut file = tokio::fs::File::create(tmp.path()).await?;

    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ProcessingError::Stream(e.to_string()))?;

        written += chunk.len() as u64;
        if written > max_bytes as u64 {
            return Err(ProcessingError::TooLarge {
                limit_bytes: max_bytes,
            });
        }

        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    file.sync_all().await?;

    tracing::debug!(
        path = %tmp.path().display(),
        size_bytes = written,
        "Upload spooled to disk"
    );

    Ok(SpooledFile {
        inner: tmp,
        size: written,
    })
}
