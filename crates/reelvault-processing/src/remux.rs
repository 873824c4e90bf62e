//! Faststart remuxing via ffmpeg.
//!
//! MP4 files written by most encoders put the moov atom at the end, which
//! forces players to download the whole file before playback can start.
//! A stream copy with `-movflags faststart` moves the atom to the front
//! without re-encoding.

use crate::error::ProcessingError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::error;

/// Suffix appended to the input path to form the remux output path.
const OUTPUT_SUFFIX: &str = ".faststart.mp4";

/// A remuxed media file on disk, deleted on drop.
#[derive(Debug)]
pub struct ProcessedFile {
    path: PathBuf,
}

impl ProcessedFile {
    /// Take ownership of an already-remuxed file on disk.
    pub fn from_path(path: PathBuf) -> Self {
        ProcessedFile { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ProcessedFile {
    fn drop(&mut self) {
        // Cleanup only; the object store already has the bytes by the time
        // a successful pipeline drops this.
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Rewrites media for streaming playback.
///
/// A trait so the upload pipeline can be tested without ffmpeg installed.
#[async_trait]
pub trait Remuxer: Send + Sync {
    async fn remux(&self, input: &Path) -> Result<ProcessedFile, ProcessingError>;
}

/// ffmpeg-backed remuxer
pub struct FfmpegRemuxer {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegRemuxer {
    pub fn new(ffmpeg_path: String, timeout: Duration) -> Self {
        Self {
            ffmpeg_path,
            timeout,
        }
    }

    fn output_path(input: &Path) -> PathBuf {
        let mut os = input.as_os_str().to_os_string();
        os.push(OUTPUT_SUFFIX);
        PathBuf::from(os)
    }
}

#[async_trait]
impl Remuxer for FfmpegRemuxer {
    async fn remux(&self, input: &Path) -> Result<ProcessedFile, ProcessingError> {
        let output_path = Self::output_path(input);

        let child = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessingError::RemuxFailed(format!("Failed to run ffmpeg: {}", e)))?;

        let start = std::time::Instant::now();
        let result = tokio::time::timeout(self.timeout, child.wait_with_output()).await;

        let output = match result {
            Ok(wait_result) => {
                wait_result.map_err(|e| ProcessingError::RemuxFailed(e.to_string()))?
            }
            Err(_) => {
                let _ = std::fs::remove_file(&output_path);
                return Err(ProcessingError::Timeout {
                    tool: "ffmpeg".to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(
                input = %input.display(),
                stderr = %stderr,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "ffmpeg remux failed"
            );
            let _ = std::fs::remove_file(&output_path);
            return Err(ProcessingError::RemuxFailed(stderr.into_owned()));
        }

        tracing::info!(
            input = %input.display(),
            output = %output_path.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Remux successful"
        );

        Ok(ProcessedFile { path: output_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_appends_suffix() {
        let output = FfmpegRemuxer::output_path(Path::new("/tmp/upload123"));
        assert_eq!(output, PathBuf::from("/tmp/upload123.faststart.mp4"));
    }

    #[tokio::test]
    async fn test_processed_file_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mp4");
        std::fs::write(&path, b"fake mp4").unwrap();

        let processed = ProcessedFile { path: path.clone() };
        assert!(path.exists());

        drop(processed);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_binary_reports_remux_failure() {
        let remuxer = FfmpegRemuxer::new(
            "/nonexistent/ffmpeg-binary".to_string(),
            Duration::from_secs(5),
        );
        let result = remuxer.remux(Path::new("/tmp/whatever.mp4")).await;
        assert!(matches!(result, Err(ProcessingError::RemuxFailed(_))));
    }
}
