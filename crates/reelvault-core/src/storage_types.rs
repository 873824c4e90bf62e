//! Storage-related enums shared between configuration and the storage crate.

use std::fmt;
use std::str::FromStr;

/// Which object-store backend the deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// How a stored video reference is turned into a client-facing URL.
///
/// `Static` composes a public URL at upload time and persists it verbatim.
/// `Signed` persists an opaque (bucket, key) pair and mints a fresh
/// time-limited URL on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlMode {
    Static,
    Signed,
}

impl FromStr for UrlMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "static" => Ok(UrlMode::Static),
            "signed" => Ok(UrlMode::Signed),
            other => Err(format!("Unknown URL mode: {}", other)),
        }
    }
}

/// Thumbnail storage strategy. Exactly one is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbnailStrategy {
    /// Raw bytes written under the public assets root, served statically.
    Disk,
    /// Bytes embedded in the record itself as a base64 data URL.
    Inline,
    /// Bytes held in a process-lifetime keyed cache, served by an endpoint.
    Memory,
}

impl FromStr for ThumbnailStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disk" => Ok(ThumbnailStrategy::Disk),
            "inline" => Ok(ThumbnailStrategy::Inline),
            "memory" => Ok(ThumbnailStrategy::Memory),
            other => Err(format!("Unknown thumbnail strategy: {}", other)),
        }
    }
}
