//! WASM-compatible player wrapper

use super::engine::{js_error_message, read_media_event, HtmlAudioEngine, MEDIA_EVENTS};
use crate::{EngineEvent, PlaybackSession};
use js_sys::Function;
use retrowav_core::{PlayerConfig, Playlist, Track};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

type SharedSession = Rc<RefCell<PlaybackSession<HtmlAudioEngine>>>;
type ChangeCallback = Rc<RefCell<Option<Function>>>;

/// Browser music player
///
/// Owns the playback session and an `<audio>` element. Element events are
/// routed back into the session; JavaScript drives the transport through the
/// exported methods. The `onChange` callback receives the session events
/// queued by each change (an array, possibly empty) and typically re-renders
/// from `nowPlaying()`.
#[wasm_bindgen]
pub struct WasmPlayer {
    session: SharedSession,
    element: HtmlAudioElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
    on_change: ChangeCallback,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player from a config object (`undefined` = built-in demo tracks)
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let engine = HtmlAudioEngine::new()?;
        Self::with_engine(&config, engine)
    }

    /// Create a player with just a track list
    #[wasm_bindgen(js_name = fromTracks)]
    pub fn from_tracks(tracks: JsValue) -> Result<WasmPlayer, JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;
        let playlist = Playlist::new(tracks).map_err(to_js)?;

        console_error_panic_hook::set_once();

        let config = PlayerConfig {
            tracks: playlist.into(),
            ..PlayerConfig::default()
        };
        Self::with_engine(&config, HtmlAudioEngine::new()?)
    }

    // ===== Playback Control =====

    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) {
        self.update(|s| s.toggle_play());
    }

    pub fn play(&self) {
        self.update(|s| s.play());
    }

    pub fn pause(&self) {
        self.update(|s| s.pause());
    }

    pub fn next(&self) {
        self.update(|s| s.next());
    }

    pub fn prev(&self) {
        self.update(|s| s.prev());
    }

    /// Play the track at `index` from the playlist overlay
    #[wasm_bindgen(js_name = selectTrack)]
    pub fn select_track(&self, index: usize) -> Result<(), JsValue> {
        self.update(|s| s.select_track(index)).map_err(to_js)
    }

    // ===== Seeking =====

    /// Seek to position in seconds
    pub fn seek(&self, position_secs: f64) {
        self.update(|s| s.seek(position_secs));
    }

    /// Seek by slider fraction (0.0 - 1.0)
    #[wasm_bindgen(js_name = seekToFraction)]
    pub fn seek_to_fraction(&self, fraction: f64) {
        self.update(|s| s.seek_to_fraction(fraction));
    }

    // ===== Volume Control =====

    /// Set volume (clamped to 0-100)
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, level: i32) {
        self.update(|s| s.set_volume(level));
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) {
        self.update(|s| s.toggle_mute());
    }

    // ===== Overlay =====

    #[wasm_bindgen(js_name = toggleOverlay)]
    pub fn toggle_overlay(&self) {
        self.update(|s| s.toggle_overlay());
    }

    #[wasm_bindgen(js_name = closeOverlay)]
    pub fn close_overlay(&self) {
        self.update(|s| s.close_overlay());
    }

    // ===== State Queries =====

    /// Snapshot for the player card
    #[wasm_bindgen(js_name = nowPlaying)]
    pub fn now_playing(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.session.borrow().now_playing();
        Ok(serde_wasm_bindgen::to_value(&snapshot)?)
    }

    /// Rows for the playlist overlay
    pub fn playlist(&self) -> Result<JsValue, JsValue> {
        let entries = self.session.borrow().playlist_entries();
        Ok(serde_wasm_bindgen::to_value(&entries)?)
    }

    /// Session events queued since the last call
    ///
    /// Only needed without an `onChange` callback; with one, events are
    /// handed to the callback as they happen.
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        let events = self.session.borrow_mut().drain_events();
        Ok(serde_wasm_bindgen::to_value(&events)?)
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.session.borrow().is_playing()
    }

    #[wasm_bindgen(js_name = trackIndex)]
    pub fn track_index(&self) -> usize {
        self.session.borrow().get_track_index()
    }

    // ===== Event Listeners =====

    /// Register a callback fired after every state change with the drained events
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: Function) {
        *self.on_change.borrow_mut() = Some(callback);
    }
}

impl WasmPlayer {
    /// Build a player around an existing engine and subscribe to its element
    pub fn with_engine(
        config: &PlayerConfig,
        engine: HtmlAudioEngine,
    ) -> Result<WasmPlayer, JsValue> {
        let element = engine.element().clone();
        let generation = engine.generation_handle();

        let session: SharedSession = Rc::new(RefCell::new(
            PlaybackSession::with_config(config, engine).map_err(to_js)?,
        ));
        let on_change: ChangeCallback = Rc::new(RefCell::new(None));

        {
            let weak = Rc::downgrade(&session);
            let on_change = Rc::clone(&on_change);
            session
                .borrow()
                .engine()
                .set_event_sink(move |event| deliver(&weak, &on_change, event));
        }

        let mut listeners = Vec::with_capacity(MEDIA_EVENTS.len());
        for name in MEDIA_EVENTS {
            let weak = Rc::downgrade(&session);
            let on_change = Rc::clone(&on_change);
            let target = element.clone();
            let generation = Rc::clone(&generation);

            let closure = Closure::<dyn FnMut()>::new(move || {
                if let Some(kind) = read_media_event(&target, name) {
                    deliver(&weak, &on_change, EngineEvent::new(generation.get(), kind));
                }
            });
            element.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            listeners.push((name, closure));
        }

        Ok(Self {
            session,
            element,
            listeners,
            on_change,
        })
    }

    fn update<T>(&self, f: impl FnOnce(&mut PlaybackSession<HtmlAudioEngine>) -> T) -> T {
        let result = f(&mut self.session.borrow_mut());
        notify(&self.session, &self.on_change);
        result
    }
}

impl Drop for WasmPlayer {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            self.element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
        self.element.pause().ok();
    }
}

/// Route an engine event into the session, then tell JavaScript
fn deliver(
    session: &Weak<RefCell<PlaybackSession<HtmlAudioEngine>>>,
    on_change: &ChangeCallback,
    event: EngineEvent,
) {
    let Some(session) = session.upgrade() else {
        return;
    };

    let applied = match session.try_borrow_mut() {
        Ok(mut session) => session.handle_engine_event(event),
        Err(_) => {
            tracing::warn!("Session busy, dropping engine event {:?}", event.kind);
            false
        }
    };

    if applied {
        notify(&session, on_change);
    }
}

/// Hand queued session events to the `onChange` callback
///
/// Without a callback the events stay queued for `drainEvents()`.
fn notify(session: &RefCell<PlaybackSession<HtmlAudioEngine>>, on_change: &ChangeCallback) {
    // Cloned so the callback may re-register itself
    let Some(cb) = on_change.borrow().clone() else {
        return;
    };

    let events = match session.try_borrow_mut() {
        Ok(mut session) => session.drain_events(),
        Err(_) => Vec::new(),
    };

    let events = match serde_wasm_bindgen::to_value(&events) {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!("Failed to serialize session events: {}", err);
            return;
        }
    };

    if let Err(err) = cb.call1(&JsValue::NULL, &events) {
        tracing::warn!("onChange callback threw: {}", js_error_message(&err));
    }
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
