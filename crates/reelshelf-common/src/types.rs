//! Core type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a base name can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A playable video file.
    Video,
    /// A poster image shown next to the video.
    Poster,
}

impl MediaKind {
    /// Content type used when it cannot be inferred from the extension.
    pub fn fallback_content_type(self) -> &'static str {
        match self {
            Self::Video => "video/mp4",
            Self::Poster => "image/jpeg",
        }
    }

    /// Route segment under `/api` serving this kind.
    pub fn route_segment(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Poster => "poster",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Poster => write!(f, "poster"),
        }
    }
}
