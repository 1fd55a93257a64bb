//! In-memory audio engine
//!
//! Plays nothing: keeps a clock per loaded source and reports what a media
//! element would report. Built for tests and demos; every command is kept in
//! an unbounded log for assertions.

use crate::engine::{AudioEngine, EngineEvent, EngineEventKind, Generation};
use crate::error::EngineError;
use std::collections::HashMap;
use std::time::Duration;

/// A command received by [`SimulatedEngine`], as recorded in its log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Load { url: String, generation: Generation },
    Play,
    Pause,
    Seek(Duration),
    SetVolume(u8),
}

/// Clock-driven stand-in for a platform audio engine
///
/// Durations are registered per url; a source without one never reports
/// `DurationKnown` and never ends. Time only moves through [`advance`](Self::advance).
#[derive(Debug, Default)]
pub struct SimulatedEngine {
    durations: HashMap<String, Duration>,
    blocked: Option<String>,

    url: Option<String>,
    generation: Generation,
    position: Duration,
    duration: Option<Duration>,
    playing: bool,
    volume: u8,

    commands: Vec<EngineCommand>,
    events: Vec<EngineEvent>,
}

impl SimulatedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the duration reported when `url` is loaded
    #[must_use]
    pub fn with_duration(mut self, url: impl Into<String>, duration: Duration) -> Self {
        self.set_duration(url, duration);
        self
    }

    pub fn set_duration(&mut self, url: impl Into<String>, duration: Duration) {
        self.durations.insert(url.into(), duration);
    }

    /// Refuse every `play()` with `reason` until [`allow_play`](Self::allow_play)
    pub fn block_play(&mut self, reason: impl Into<String>) {
        self.blocked = Some(reason.into());
    }

    pub fn allow_play(&mut self) {
        self.blocked = None;
    }

    /// Move the clock forward while playing
    ///
    /// Buffers a `TimeUpdate`; on reaching the end also `Paused` and `Ended`.
    pub fn advance(&mut self, elapsed: Duration) {
        if !self.playing {
            return;
        }

        self.position += elapsed;
        match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                self.playing = false;
                self.emit(EngineEventKind::TimeUpdate(duration));
                self.emit(EngineEventKind::Paused);
                self.emit(EngineEventKind::Ended);
            }
            _ => self.emit(EngineEventKind::TimeUpdate(self.position)),
        }
    }

    /// Buffer an arbitrary event for the current source
    pub fn emit(&mut self, kind: EngineEventKind) {
        self.events.push(EngineEvent::new(self.generation, kind));
    }

    /// Every command received since the last [`take_commands`](Self::take_commands)
    ///
    /// The log is never trimmed; long-running hosts should take it periodically.
    pub fn commands(&self) -> &[EngineCommand] {
        &self.commands
    }

    /// Empty the command log, returning its contents
    pub fn take_commands(&mut self) -> Vec<EngineCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn current_url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> Duration {
        self.position
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }
}

impl AudioEngine for SimulatedEngine {
    fn load(&mut self, url: &str, generation: Generation) {
        self.commands.push(EngineCommand::Load {
            url: url.to_string(),
            generation,
        });

        self.url = Some(url.to_string());
        self.generation = generation;
        self.position = Duration::ZERO;
        self.playing = false;
        self.duration = self.durations.get(url).copied();

        if let Some(duration) = self.duration {
            self.emit(EngineEventKind::DurationKnown(duration));
        }
    }

    fn play(&mut self) -> Result<(), EngineError> {
        self.commands.push(EngineCommand::Play);

        if let Some(reason) = &self.blocked {
            return Err(EngineError::PlayBlocked(reason.clone()));
        }

        if !self.playing {
            self.playing = true;
            self.emit(EngineEventKind::Playing);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.commands.push(EngineCommand::Pause);

        if self.playing {
            self.playing = false;
            self.emit(EngineEventKind::Paused);
        }
    }

    fn seek(&mut self, position: Duration) {
        self.commands.push(EngineCommand::Seek(position));

        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.emit(EngineEventKind::TimeUpdate(self.position));
    }

    fn set_volume(&mut self, percent: u8) {
        self.commands.push(EngineCommand::SetVolume(percent));
        self.volume = percent.min(100);
    }

    fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(engine: &mut SimulatedEngine) -> Vec<EngineEventKind> {
        engine.drain_events().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn load_reports_registered_duration() {
        let mut engine =
            SimulatedEngine::new().with_duration("/a.mp3", Duration::from_secs(180));
        engine.load("/a.mp3", Generation::new(4));

        let events = engine.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].generation, Generation::new(4));
        assert_eq!(
            events[0].kind,
            EngineEventKind::DurationKnown(Duration::from_secs(180))
        );
    }

    #[test]
    fn unknown_source_never_ends() {
        let mut engine = SimulatedEngine::new();
        engine.load("/mystery.mp3", Generation::new(1));
        engine.play().unwrap();
        engine.advance(Duration::from_secs(10_000));

        assert!(engine.is_playing());
        assert!(!kinds(&mut engine).contains(&EngineEventKind::Ended));
    }

    #[test]
    fn reaching_the_end_pauses_then_ends() {
        let mut engine = SimulatedEngine::new().with_duration("/a.mp3", Duration::from_secs(5));
        engine.load("/a.mp3", Generation::new(1));
        engine.play().unwrap();
        engine.drain_events();

        engine.advance(Duration::from_secs(7));
        assert_eq!(
            kinds(&mut engine),
            vec![
                EngineEventKind::TimeUpdate(Duration::from_secs(5)),
                EngineEventKind::Paused,
                EngineEventKind::Ended,
            ]
        );
        assert!(!engine.is_playing());
    }

    #[test]
    fn blocked_play_is_refused() {
        let mut engine = SimulatedEngine::new();
        engine.block_play("no user gesture");
        assert_eq!(
            engine.play(),
            Err(EngineError::PlayBlocked("no user gesture".to_string()))
        );
        assert!(!engine.is_playing());

        engine.allow_play();
        assert!(engine.play().is_ok());
    }

    #[test]
    fn commands_are_recorded_in_order() {
        let mut engine = SimulatedEngine::new();
        engine.load("/a.mp3", Generation::new(1));
        engine.set_volume(120);
        engine.seek(Duration::from_secs(3));

        assert_eq!(
            engine.take_commands(),
            vec![
                EngineCommand::Load {
                    url: "/a.mp3".to_string(),
                    generation: Generation::new(1),
                },
                EngineCommand::SetVolume(120),
                EngineCommand::Seek(Duration::from_secs(3)),
            ]
        );
        assert_eq!(engine.volume(), 100);
        assert!(engine.commands().is_empty());
    }
}
