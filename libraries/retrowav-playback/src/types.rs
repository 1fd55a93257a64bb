//! Core types for the playback session

use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport state as seen by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Not playing, positioned at the start of the track
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
