//! `AudioEngine` over the browser's `HtmlAudioElement`

use crate::{
    engine::{AudioEngine, EngineEvent, EngineEventKind, Generation},
    error::EngineError,
    volume::perceptual_gain,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{DomException, HtmlAudioElement};

type EventSink = Rc<RefCell<Option<Box<dyn Fn(EngineEvent)>>>>;

/// Audio engine backed by an `<audio>` element
///
/// Commands map one-to-one onto the media element API. `play()` returns a
/// promise in browsers; a rejection is delivered later through the event sink
/// as [`EngineEventKind::PlayRejected`], tagged with the generation that was
/// current when `play()` was called. A request aborted by a later `pause()`
/// or source change is not reported.
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
    generation: Rc<Cell<Generation>>,
    sink: EventSink,
}

impl HtmlAudioEngine {
    /// Create an engine with a fresh, detached `Audio()` element
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self::from_element(HtmlAudioElement::new()?))
    }

    /// Wrap an existing element (e.g. one rendered in the page)
    pub fn from_element(element: HtmlAudioElement) -> Self {
        Self {
            element,
            generation: Rc::new(Cell::new(Generation::default())),
            sink: Rc::new(RefCell::new(None)),
        }
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.element
    }

    /// Shared handle to the generation of the loaded source
    ///
    /// Element event listeners read it to tag the events they forward.
    pub fn generation_handle(&self) -> Rc<Cell<Generation>> {
        Rc::clone(&self.generation)
    }

    /// Where asynchronous engine events (rejected `play()`) are delivered
    pub fn set_event_sink(&self, sink: impl Fn(EngineEvent) + 'static) {
        *self.sink.borrow_mut() = Some(Box::new(sink));
    }
}

/// Media element events forwarded to the session
pub const MEDIA_EVENTS: [&str; 5] = ["timeupdate", "durationchange", "ended", "play", "pause"];

/// Translate a DOM media event into an engine event
///
/// `durationchange` is ignored while the duration is NaN (nothing loaded) or
/// infinite (live stream).
pub fn read_media_event(element: &HtmlAudioElement, event_name: &str) -> Option<EngineEventKind> {
    match event_name {
        "timeupdate" => Some(EngineEventKind::TimeUpdate(secs_to_duration(
            element.current_time(),
        ))),
        "durationchange" => {
            let secs = element.duration();
            (secs.is_finite() && secs > 0.0)
                .then(|| EngineEventKind::DurationKnown(secs_to_duration(secs)))
        }
        "ended" => Some(EngineEventKind::Ended),
        "play" => Some(EngineEventKind::Playing),
        "pause" => Some(EngineEventKind::Paused),
        _ => None,
    }
}

impl AudioEngine for HtmlAudioEngine {
    fn load(&mut self, url: &str, generation: Generation) {
        self.generation.set(generation);
        self.element.set_src(url);
    }

    fn play(&mut self) -> Result<(), EngineError> {
        let promise = self
            .element
            .play()
            .map_err(|err| EngineError::Platform(js_error_message(&err)))?;

        let generation = self.generation.get();
        let sink = Rc::clone(&self.sink);
        wasm_bindgen_futures::spawn_local(async move {
            let Err(err) = JsFuture::from(promise).await else {
                return;
            };

            let name = err
                .dyn_ref::<DomException>()
                .map(DomException::name)
                .unwrap_or_default();
            let Some(kind) = EngineEventKind::from_play_rejection(&name, js_error_message(&err))
            else {
                tracing::debug!("play() for {} superseded by a later command", generation);
                return;
            };

            web_sys::console::warn_1(&err);
            if let Some(sink) = sink.borrow().as_ref() {
                sink(EngineEvent::new(generation, kind));
            }
        });

        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.element.pause() {
            tracing::warn!("pause() failed: {}", js_error_message(&err));
        }
    }

    fn seek(&mut self, position: Duration) {
        self.element.set_current_time(position.as_secs_f64());
    }

    fn set_volume(&mut self, percent: u8) {
        self.element.set_volume(f64::from(perceptual_gain(percent)));
    }
}

fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
    } else {
        Duration::ZERO
    }
}

/// Best-effort message from a thrown JS value
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    value
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .unwrap_or_else(|| format!("{value:?}"))
}
