//! Platform-agnostic audio engine trait
//!
//! Abstracts "the thing that actually plays sound" (an `<audio>` element in a
//! browser, a simulated clock in tests).

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Identifier of one `load` request
///
/// The session bumps the generation on every load and the engine tags the
/// events it emits with the generation of the source that produced them.
/// Events from an older generation are stale and get discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// What happened inside the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEventKind {
    /// Playback position moved
    TimeUpdate(Duration),

    /// Duration of the loaded source became known
    DurationKnown(Duration),

    /// Source played to its end
    Ended,

    /// Engine actually started playing
    Playing,

    /// Engine actually paused
    Paused,

    /// An accepted `play()` request failed later (e.g. a rejected promise)
    PlayRejected(String),
}

impl EngineEventKind {
    /// Classify a rejected `play()` request by the platform's error name
    ///
    /// `AbortError` means a later `pause()` or `load()` superseded the
    /// request. That is a cancellation, not a failure, and yields no event.
    pub fn from_play_rejection(error_name: &str, message: impl Into<String>) -> Option<Self> {
        if error_name == "AbortError" {
            None
        } else {
            Some(Self::PlayRejected(message.into()))
        }
    }
}

/// Event emitted by an engine, tagged with the load it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub generation: Generation,
    pub kind: EngineEventKind,
}

impl EngineEvent {
    pub fn new(generation: Generation, kind: EngineEventKind) -> Self {
        Self { generation, kind }
    }
}

/// Platform audio playback primitive
///
/// Every command is fire-and-forget except [`play`](Self::play), which may be
/// refused. Engines report what actually happens through [`EngineEvent`]s,
/// either pushed by the host into
/// [`PlaybackSession::handle_engine_event`](crate::PlaybackSession::handle_engine_event)
/// or buffered and returned from [`drain_events`](Self::drain_events).
#[cfg_attr(test, mockall::automock)]
pub trait AudioEngine {
    /// Start loading a new source; later events carry `generation`
    fn load(&mut self, url: &str, generation: Generation);

    /// Start or resume playback
    ///
    /// # Errors
    /// Returns an error if the platform refuses to start playback
    fn play(&mut self) -> Result<(), EngineError>;

    fn pause(&mut self);

    /// Jump to `position` from the start of the source
    fn seek(&mut self, position: Duration);

    /// Set output volume in percent (0-100)
    fn set_volume(&mut self, percent: u8);

    /// Hand back buffered events (pull-based engines)
    ///
    /// Push-based engines deliver events directly and keep the default.
    fn drain_events(&mut self) -> Vec<EngineEvent> {
        Vec::new()
    }
}
