/// Track metadata types
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accent colour used to tint the album-art area for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    #[default]
    Primary,
    Secondary,
    Accent,
}

impl ColorTag {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
        }
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One playable item
///
/// Tracks are defined at startup and never mutate. They carry no id: a track
/// is identified by its position in the [`Playlist`](super::Playlist).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,

    /// Location handed to the audio engine
    pub url: String,

    #[serde(default)]
    pub color: ColorTag,
}

impl Track {
    /// Create a new track
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        url: impl Into<String>,
        color: ColorTag,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            url: url.into(),
            color,
        }
    }
}
