//! Persisted media references.
//!
//! A video record's media reference is either an opaque (bucket, key) pair
//! that gets resolved to a signed URL at read time, or an already-resolved
//! URL persisted verbatim. The pair is a structured type; the delimited
//! string form exists only at the database boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Separator used in the persisted text form of a stored reference.
/// Storage keys are base64url plus `/` path segments, so a comma can
/// never appear inside a key.
const STORED_SEPARATOR: char = ',';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MediaReference {
    /// Opaque pointer into the object store; not itself a usable URL.
    Stored { bucket: String, key: String },
    /// Fully resolved URL, valid as long as the object persists.
    Url(String),
}

impl MediaReference {
    pub fn stored(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        MediaReference::Stored {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        MediaReference::Url(url.into())
    }

    /// The object key, if this reference points into the object store.
    pub fn key(&self) -> Option<&str> {
        match self {
            MediaReference::Stored { key, .. } => Some(key),
            MediaReference::Url(_) => None,
        }
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaReference::Stored { bucket, key } => {
                write!(f, "{}{}{}", bucket, STORED_SEPARATOR, key)
            }
            MediaReference::Url(url) => write!(f, "{}", url),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Malformed media reference: {0}")]
pub struct MediaReferenceParseError(String);

impl FromStr for MediaReference {
    type Err = MediaReferenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(MediaReferenceParseError("empty string".to_string()));
        }
        // URLs carry a scheme and never contain the separator before it;
        // anything with "://" is a resolved URL, anything else must be a
        // bucket,key pair.
        if s.contains("://") {
            return Ok(MediaReference::Url(s.to_string()));
        }
        match s.split_once(STORED_SEPARATOR) {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => {
                Ok(MediaReference::Stored {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })
            }
            _ => Err(MediaReferenceParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for MediaReference {
    type Error = MediaReferenceParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MediaReference> for String {
    fn from(r: MediaReference) -> String {
        r.to_string()
    }
}
