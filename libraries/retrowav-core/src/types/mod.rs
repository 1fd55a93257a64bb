//! Domain types for RETRO.WAV

mod playlist;
mod track;

pub use playlist::Playlist;
pub use track::{ColorTag, Track};
