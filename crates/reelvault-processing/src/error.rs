use thiserror::Error;

/// Media pipeline errors
///
/// `TooLarge` and `Stream` are caller problems; everything else is a
/// server-side processing failure. A tool failure is never reported as a
/// classification result.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Upload exceeds the maximum allowed size of {limit_bytes} bytes")]
    TooLarge { limit_bytes: usize },

    #[error("Upload stream failed: {0}")]
    Stream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ffprobe failed: {0}")]
    ProbeFailed(String),

    #[error("Malformed ffprobe output: {0}")]
    MalformedProbeOutput(String),

    #[error("No video stream found in uploaded media")]
    NoVideoStream,

    #[error("ffmpeg remux failed: {0}")]
    RemuxFailed(String),

    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },
}

impl ProcessingError {
    /// Whether the failure is the client's fault rather than the server's.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProcessingError::TooLarge { .. } | ProcessingError::Stream(_)
        )
    }
}
