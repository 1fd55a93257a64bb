//! Render-ready views of the session
//!
//! Everything here is derived data: the session stays the single owner of
//! state and the UI layer reads these snapshots.

use crate::types::SessionState;
use retrowav_core::ColorTag;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Format a time as `m:ss`
///
/// Minutes are not padded and fractional seconds are truncated, so 61.9s
/// reads `1:01`. An unknown (zero) duration reads `0:00`.
pub fn format_clock(time: Duration) -> String {
    let secs = time.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Fraction of the track played, in `[0, 1]`
///
/// Zero while the duration is unknown.
pub fn progress_fraction(position: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }
    (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Everything the player card shows for the current track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub index: usize,
    pub track_count: usize,
    pub title: String,
    pub artist: String,
    pub color: ColorTag,

    /// Elapsed time, `m:ss`
    pub elapsed: String,

    /// Track length, `m:ss` (`0:00` until known)
    pub total: String,

    pub progress: f64,
    pub state: SessionState,

    /// Drives the spinning-record animation
    pub is_playing: bool,

    pub volume: u8,
    pub is_muted: bool,
    pub overlay_visible: bool,
}

impl NowPlaying {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One row of the playlist overlay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistEntry {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub color: ColorTag,
    pub is_current: bool,
}
