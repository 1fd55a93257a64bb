//! RETRO.WAV - Playback Session
//!
//! Platform-agnostic playback state for the RETRO.WAV player widget.
//!
//! This crate provides:
//! - The playback session state machine (play/pause, next/prev, select, seek)
//! - Volume control (0-100%, mute/unmute, perceptual gain curve)
//! - Load generations so late engine events from an old track are ignored
//! - UI events and render-ready snapshots (`NowPlaying`, playlist rows)
//! - A simulated engine for tests and demos
//! - Browser bindings over `HtmlAudioElement` (feature `wasm`)
//!
//! # Architecture
//!
//! The session never plays sound. It drives an [`AudioEngine`] with
//! fire-and-forget commands and treats the engine as the source of truth:
//! position, duration, end-of-track and the actual playing state arrive as
//! [`EngineEvent`]s.
//!
//! # Example
//!
//! ```rust
//! use retrowav_core::PlayerConfig;
//! use retrowav_playback::{PlaybackSession, SimulatedEngine};
//! use std::time::Duration;
//!
//! let config = PlayerConfig::default();
//! let engine = SimulatedEngine::new()
//!     .with_duration("/audio/html-rhythms.mp3", Duration::from_secs(180));
//!
//! let mut session = PlaybackSession::with_config(&config, engine).unwrap();
//! session.pump_engine();
//! assert_eq!(session.now_playing().total, "3:00");
//!
//! session.toggle_play();
//! session.engine_mut().advance(Duration::from_secs(65));
//! session.pump_engine();
//! assert_eq!(session.now_playing().elapsed, "1:05");
//!
//! session.next();
//! assert_eq!(session.get_current_track().title, "CSS Cascades");
//! assert!(session.is_playing());
//! ```

mod display;
mod engine;
mod error;
mod events;
mod session;
mod simulated;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use display::{format_clock, progress_fraction, NowPlaying, PlaylistEntry};
pub use engine::{AudioEngine, EngineEvent, EngineEventKind, Generation};
pub use error::{EngineError, PlaybackError, Result};
pub use events::SessionEvent;
pub use session::{PlaybackSession, MAX_PENDING_EVENTS};
pub use simulated::{EngineCommand, SimulatedEngine};
pub use types::SessionState;
pub use volume::{clamp_percent, perceptual_gain, Volume};
