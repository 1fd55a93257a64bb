//! Session Events
//!
//! Event-based communication for UI synchronization. The session queues an
//! event whenever something the UI renders changes; the rendering layer
//! drains them once per event-loop turn.

use crate::types::SessionState;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Events emitted by the playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    /// Transport state changed (play/pause/stopped)
    StateChanged { state: SessionState },

    /// Selected track changed
    TrackChanged {
        /// Index of the new track
        index: usize,
        /// Index of the track that was selected before
        previous: usize,
    },

    /// Playback position moved (engine report or seek)
    PositionChanged { position: Duration },

    /// Duration of the current track became known
    DurationChanged { duration: Duration },

    VolumeChanged {
        /// New volume level (0-100)
        level: u8,
        is_muted: bool,
    },

    /// Playlist overlay shown or hidden
    OverlayChanged { visible: bool },

    /// Something failed (playback start refused)
    Error { message: String },
}
