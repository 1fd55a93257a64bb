//! WASM bindings for retrowav-playback
//!
//! Runs the playback session in the browser against a native `<audio>`
//! element and exposes it to JavaScript.

pub mod engine;
pub mod player;

pub use engine::HtmlAudioEngine;
pub use player::WasmPlayer;
