//! RETRO.WAV Core
//!
//! Platform-agnostic domain types, configuration and error handling for the
//! RETRO.WAV player.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `ColorTag`, `Playlist`
//! - **Configuration**: `PlayerConfig` (TOML file + `RETROWAV_*` environment)
//! - **Error Handling**: `CoreError` and `Result`
//!
//! Playback itself lives in `retrowav-playback`.
//!
//! # Example
//!
//! ```rust
//! use retrowav_core::{ColorTag, Playlist, Track};
//!
//! let playlist = Playlist::new(vec![
//!     Track::new("HTML Rhythms", "The Div Tags", "/audio/html-rhythms.mp3", ColorTag::Primary),
//!     Track::new("CSS Cascades", "Style Sheets", "/audio/css-cascades.mp3", ColorTag::Secondary),
//! ])
//! .unwrap();
//!
//! assert_eq!(playlist.len(), 2);
//! assert_eq!(playlist.next_index(1), 0);
//! ```

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod types;

pub use config::PlayerConfig;
pub use error::{CoreError, Result};
pub use types::{ColorTag, Playlist, Track};
