//! Error types for playback management

use retrowav_core::CoreError;
use thiserror::Error;

/// Failures reported by an [`AudioEngine`](crate::AudioEngine)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Playback start refused by the environment (autoplay policy, no user gesture)
    #[error("Playback blocked: {0}")]
    PlayBlocked(String),

    /// Any other platform failure
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Track index outside the playlist
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Domain/configuration error
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
