//! Aspect-ratio classification for uploaded videos.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discrete orientation category derived from a video stream's dimensions.
///
/// `Other` is a successful classification (the dimensions simply match
/// neither 16:9 nor 9:16); probing failures are reported separately and
/// never collapse into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
    Other,
}

impl Orientation {
    /// Classify integer stream dimensions.
    ///
    /// The comparisons use integer division on purpose: edge dimensions
    /// such as 1366x768 must classify deterministically, and floating-point
    /// ratio comparisons diverge there.
    pub fn classify(width: i64, height: i64) -> Orientation {
        if height * 16 / 9 == width || width * 9 / 16 == height {
            return Orientation::Landscape;
        }
        if height * 9 / 16 == width || width * 16 / 9 == height {
            return Orientation::Portrait;
        }
        Orientation::Other
    }

    /// Storage-key path segment for this orientation.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            Orientation::Landscape => "landscape/",
            Orientation::Portrait => "portrait/",
            Orientation::Other => "other/",
        }
    }

    /// Display string of the underlying aspect ratio.
    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            Orientation::Landscape => "16:9",
            Orientation::Portrait => "9:16",
            Orientation::Other => "other",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.aspect_ratio())
    }
}
