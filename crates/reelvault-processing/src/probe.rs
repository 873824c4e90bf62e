//! Stream dimension probing via ffprobe.

use crate::error::ProcessingError;
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::error;

/// Dimensions of the first stream reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaInfo {
    pub width: i64,
    pub height: i64,
}

/// Probes uploaded media for stream dimensions.
///
/// A trait so the upload pipeline can be tested without ffprobe installed.
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ProcessingError>;
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    streams: Option<Vec<FfprobeStream>>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<i64>,
    height: Option<i64>,
}

/// ffprobe-backed prober
pub struct FfprobeProber {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: String, timeout: Duration) -> Self {
        Self {
            ffprobe_path,
            timeout,
        }
    }
}

/// Parse ffprobe JSON and extract the first stream's dimensions.
fn parse_probe_output(stdout: &[u8]) -> Result<MediaInfo, ProcessingError> {
    let output: FfprobeOutput = serde_json::from_slice(stdout)
        .map_err(|e| ProcessingError::MalformedProbeOutput(e.to_string()))?;

    let stream = output
        .streams
        .and_then(|streams| streams.into_iter().next())
        .ok_or(ProcessingError::NoVideoStream)?;

    match (stream.width, stream.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(MediaInfo { width, height }),
        _ => Err(ProcessingError::MalformedProbeOutput(
            "first stream has no usable dimensions".to_string(),
        )),
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ProcessingError> {
        let child = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessingError::ProbeFailed(format!("Failed to run ffprobe: {}", e)))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ProcessingError::Timeout {
                tool: "ffprobe".to_string(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|e| ProcessingError::ProbeFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(path = %path.display(), stderr = %stderr, "ffprobe failed");
            return Err(ProcessingError::ProbeFailed(stderr.into_owned()));
        }

        parse_probe_output(&output.stdout)
    }
}
