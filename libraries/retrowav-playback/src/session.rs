//! Playback session - core state machine
//!
//! Coordinates track selection, play/pause, position and volume against an
//! [`AudioEngine`]. The session is a cache of engine state: commands go out
//! immediately, engine events flow back in and win.

use crate::{
    display::{format_clock, progress_fraction, NowPlaying, PlaylistEntry},
    engine::{AudioEngine, EngineEvent, EngineEventKind, Generation},
    error::{PlaybackError, Result},
    events::SessionEvent,
    types::SessionState,
    volume::Volume,
};
use retrowav_core::{PlayerConfig, Playlist, Track};
use std::time::Duration;

/// Oldest queued events are dropped beyond this many
pub const MAX_PENDING_EVENTS: usize = 1024;

/// The player's single piece of mutable state
///
/// Owned by the UI layer and mutated through `&mut self` only; there is one
/// writer and no locking.
pub struct PlaybackSession<E: AudioEngine> {
    engine: E,
    playlist: Playlist,

    // State
    track_index: usize,
    is_playing: bool,
    position: Duration,
    duration: Duration,
    volume: Volume,
    overlay_visible: bool,

    // Bumped on every load; engine events from other generations are stale
    generation: Generation,

    // Event queue for UI synchronization
    pending_events: Vec<SessionEvent>,
}

impl<E: AudioEngine> PlaybackSession<E> {
    /// Create a paused session on the first track at 80% volume
    pub fn new(playlist: Playlist, engine: E) -> Self {
        Self::from_parts(playlist, engine, 0, Volume::default())
    }

    /// Create a session from player configuration
    pub fn with_config(config: &PlayerConfig, engine: E) -> Result<Self> {
        config.validate()?;
        let playlist = config.playlist()?;

        let mut volume = Volume::new(config.volume);
        if config.muted {
            volume.mute();
        }

        Ok(Self::from_parts(
            playlist,
            engine,
            config.start_index,
            volume,
        ))
    }

    fn from_parts(playlist: Playlist, engine: E, track_index: usize, volume: Volume) -> Self {
        let track_index = if playlist.contains_index(track_index) {
            track_index
        } else {
            0
        };

        let mut session = Self {
            engine,
            playlist,
            track_index,
            is_playing: false,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume,
            overlay_visible: false,
            generation: Generation::default(),
            pending_events: Vec::new(),
        };

        session.load_current();
        let level = session.volume.effective_level();
        session.engine.set_volume(level);
        session
    }

    // ===== Transport =====

    /// Playing ↔ Paused
    pub fn toggle_play(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start or resume playback (no-op while playing)
    pub fn play(&mut self) {
        if self.is_playing {
            return;
        }
        self.request_play();
    }

    /// Pause playback (no-op while paused)
    pub fn pause(&mut self) {
        if !self.is_playing {
            return;
        }
        self.engine.pause();
        self.set_playing(false);
    }

    /// Jump to track `index`, start it from zero and close the overlay
    pub fn select_track(&mut self, index: usize) -> Result<()> {
        if !self.playlist.contains_index(index) {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }

        self.change_track(index);
        self.close_overlay();
        self.request_play();
        Ok(())
    }

    /// Skip to the next track, wrapping after the last one
    ///
    /// Always resumes playback, even when paused.
    pub fn next(&mut self) {
        let index = self.playlist.next_index(self.track_index);
        self.change_track(index);
        self.request_play();
    }

    /// Go back one track, wrapping before the first one
    ///
    /// Always resumes playback, even when paused.
    pub fn prev(&mut self) {
        let index = self.playlist.prev_index(self.track_index);
        self.change_track(index);
        self.request_play();
    }

    // ===== Seek =====

    /// Seek to `position_secs`, clamped to `[0, duration]`
    ///
    /// While the duration is still unknown the only reachable position is 0.
    /// Play/pause state is untouched.
    pub fn seek(&mut self, position_secs: f64) {
        let target = clamp_seek(position_secs, self.duration);
        self.engine.seek(target);
        self.update_position(target);
    }

    /// Seek to a fraction of the track (0.0 - 1.0)
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.seek(self.duration.as_secs_f64() * fraction);
    }

    // ===== Volume =====

    /// Set volume, clamped to 0-100
    pub fn set_volume(&mut self, level: i32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    pub fn mute(&mut self) {
        self.volume.mute();
        self.apply_volume();
    }

    pub fn unmute(&mut self) {
        self.volume.unmute();
        self.apply_volume();
    }

    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    // ===== Overlay =====

    pub fn toggle_overlay(&mut self) {
        self.set_overlay(!self.overlay_visible);
    }

    pub fn close_overlay(&mut self) {
        self.set_overlay(false);
    }

    // ===== Engine events =====

    /// Apply one engine event
    ///
    /// Returns false when the event belongs to an earlier load and was dropped.
    pub fn handle_engine_event(&mut self, event: EngineEvent) -> bool {
        if event.generation != self.generation {
            tracing::trace!(
                "Discarding stale {:?} from {} (current {})",
                event.kind,
                event.generation,
                self.generation
            );
            return false;
        }

        match event.kind {
            EngineEventKind::TimeUpdate(position) => {
                let position = if self.duration.is_zero() {
                    position
                } else {
                    position.min(self.duration)
                };
                self.update_position(position);
            }
            EngineEventKind::DurationKnown(duration) => {
                if duration != self.duration {
                    self.duration = duration;
                    self.queue_event(SessionEvent::DurationChanged { duration });
                }
                if !duration.is_zero() && self.position > duration {
                    self.update_position(duration);
                }
            }
            EngineEventKind::Ended => {
                tracing::debug!("Track {} ended, advancing", self.track_index);
                self.next();
            }
            EngineEventKind::Playing => self.set_playing(true),
            EngineEventKind::Paused => self.set_playing(false),
            EngineEventKind::PlayRejected(reason) => self.play_failed(&reason),
        }

        true
    }

    /// Apply every event the engine has buffered
    ///
    /// Returns the number of events that were current (not stale).
    pub fn pump_engine(&mut self) -> usize {
        let mut applied = 0;
        for event in self.engine.drain_events() {
            if self.handle_engine_event(event) {
                applied += 1;
            }
        }
        applied
    }

    // ===== State Queries =====

    pub fn get_state(&self) -> SessionState {
        if self.is_playing {
            SessionState::Playing
        } else if self.position.is_zero() {
            SessionState::Stopped
        } else {
            SessionState::Paused
        }
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn get_track_index(&self) -> usize {
        self.track_index
    }

    pub fn get_current_track(&self) -> &Track {
        &self.playlist[self.track_index]
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn get_position(&self) -> Duration {
        self.position
    }

    /// Duration of the current track, zero until the engine reports it
    pub fn get_duration(&self) -> Duration {
        self.duration
    }

    /// Fraction played, 0 while the duration is unknown
    pub fn progress(&self) -> f64 {
        progress_fraction(self.position, self.duration)
    }

    pub fn get_volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Snapshot of everything the player card renders
    pub fn now_playing(&self) -> NowPlaying {
        let track = self.get_current_track();
        NowPlaying {
            index: self.track_index,
            track_count: self.playlist.len(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            color: track.color,
            elapsed: format_clock(self.position),
            total: format_clock(self.duration),
            progress: self.progress(),
            state: self.get_state(),
            is_playing: self.is_playing,
            volume: self.volume.level(),
            is_muted: self.volume.is_muted(),
            overlay_visible: self.overlay_visible,
        }
    }

    /// Rows for the playlist overlay
    pub fn playlist_entries(&self) -> Vec<PlaylistEntry> {
        self.playlist
            .iter()
            .enumerate()
            .map(|(index, track)| PlaylistEntry {
                index,
                title: track.title.clone(),
                artist: track.artist.clone(),
                color: track.color,
                is_current: index == self.track_index,
            })
            .collect()
    }

    // ===== Events =====

    /// Take all queued UI events
    ///
    /// Hosts drain once per turn. Undrained, consecutive position reports
    /// merge and the queue stops growing at [`MAX_PENDING_EVENTS`].
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn load_current(&mut self) {
        self.generation = self.generation.next();
        let url = self.playlist[self.track_index].url.clone();
        tracing::debug!(
            "Loading track {} ({}) as {}",
            self.track_index,
            url,
            self.generation
        );
        self.engine.load(&url, self.generation);
    }

    fn change_track(&mut self, index: usize) {
        let previous = self.track_index;
        self.track_index = index;
        self.duration = Duration::ZERO;
        self.load_current();

        self.queue_event(SessionEvent::TrackChanged { index, previous });
        self.update_position(Duration::ZERO);
    }

    /// Ask the engine to play and reflect the outcome
    ///
    /// Called after every load too: loading a new source stops the engine.
    fn request_play(&mut self) {
        match self.engine.play() {
            Ok(()) => self.set_playing(true),
            Err(err) => self.play_failed(&err.to_string()),
        }
    }

    fn play_failed(&mut self, reason: &str) {
        tracing::warn!(
            "Playback failed for track {}: {}",
            self.track_index,
            reason
        );
        self.set_playing(false);
        self.queue_event(SessionEvent::Error {
            message: reason.to_string(),
        });
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        let state = self.get_state();
        tracing::debug!("Session state -> {}", state);
        self.queue_event(SessionEvent::StateChanged { state });
    }

    fn update_position(&mut self, position: Duration) {
        if self.position == position {
            return;
        }
        self.position = position;

        // Back-to-back position reports collapse into the latest
        if let Some(SessionEvent::PositionChanged { position: queued }) =
            self.pending_events.last_mut()
        {
            *queued = position;
        } else {
            self.queue_event(SessionEvent::PositionChanged { position });
        }
    }

    fn apply_volume(&mut self) {
        self.engine.set_volume(self.volume.effective_level());
        self.queue_event(SessionEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }

    fn queue_event(&mut self, event: SessionEvent) {
        if self.pending_events.len() >= MAX_PENDING_EVENTS {
            let dropped = self.pending_events.remove(0);
            tracing::trace!("Event queue full, dropping {:?}", dropped);
        }
        self.pending_events.push(event);
    }

    fn set_overlay(&mut self, visible: bool) {
        if self.overlay_visible != visible {
            self.overlay_visible = visible;
            self.queue_event(SessionEvent::OverlayChanged { visible });
        }
    }
}

/// Clamp a requested seek (seconds, possibly negative or non-finite) into
/// `[0, duration]`
fn clamp_seek(position_secs: f64, duration: Duration) -> Duration {
    if position_secs.is_nan() || position_secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(position_secs)
        .map_or(duration, |position| position.min(duration))
}
