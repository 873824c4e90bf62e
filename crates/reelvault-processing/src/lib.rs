//! Reelvault Processing Library
//!
//! Media ingestion pipeline stages: spooling uploads to disk, probing
//! stream dimensions with ffprobe, and remuxing for streaming playback
//! with ffmpeg. Each stage owns its temporary file and cleans up on drop,
//! so an error anywhere in the pipeline leaves nothing behind.

pub mod error;
pub mod probe;
pub mod remux;
pub mod spool;

pub use error::ProcessingError;
pub use probe::{FfprobeProber, MediaInfo, MediaProber};
pub use remux::{FfmpegRemuxer, ProcessedFile, Remuxer};
pub use spool::{spool_stream, SpooledFile};
