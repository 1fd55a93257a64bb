//! Property-based tests for the playback session
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use retrowav_core::{ColorTag, Playlist, Track};
use retrowav_playback::{EngineEvent, EngineEventKind, PlaybackSession, SimulatedEngine};
use std::time::Duration;

// ===== Helpers =====

fn create_playlist(n: usize) -> Playlist {
    Playlist::new(
        (0..n)
            .map(|i| {
                Track::new(
                    format!("Track {i}"),
                    "Artist",
                    format!("/audio/{i}.mp3"),
                    ColorTag::Primary,
                )
            })
            .collect(),
    )
    .unwrap()
}

/// Session over `n` tracks of `secs` each, parked on `start`
fn session_at(n: usize, start: usize, secs: u64) -> PlaybackSession<SimulatedEngine> {
    let mut engine = SimulatedEngine::new();
    for i in 0..n {
        engine.set_duration(format!("/audio/{i}.mp3"), Duration::from_secs(secs));
    }
    let mut session = PlaybackSession::new(create_playlist(n), engine);
    session.select_track(start).unwrap();
    session.pump_engine();
    session
}

#[derive(Debug, Clone)]
enum Op {
    TogglePlay,
    Next,
    Prev,
    Select(usize),
    Seek(f64),
    SetVolume(i32),
    ToggleOverlay,
    Advance(u64),
    Ended,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::TogglePlay),
        Just(Op::Next),
        Just(Op::Prev),
        (0usize..64).prop_map(Op::Select),
        (-1000.0f64..1000.0).prop_map(Op::Seek),
        (-500i32..500).prop_map(Op::SetVolume),
        Just(Op::ToggleOverlay),
        (0u64..400).prop_map(Op::Advance),
        Just(Op::Ended),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: `next` n times returns to the starting track
    #[test]
    fn next_n_times_is_identity(n in 1usize..40, start_seed in 0usize..1000) {
        let start = start_seed % n;
        let mut session = session_at(n, start, 120);

        for _ in 0..n {
            session.next();
        }

        prop_assert_eq!(session.get_track_index(), start);
    }

    /// Property: `prev` and `next` undo each other
    #[test]
    fn prev_next_round_trip(n in 1usize..40, start_seed in 0usize..1000, prev_first in any::<bool>()) {
        let start = start_seed % n;
        let mut session = session_at(n, start, 120);

        if prev_first {
            session.prev();
            session.next();
        } else {
            session.next();
            session.prev();
        }

        prop_assert_eq!(session.get_track_index(), start);
    }

    /// Property: after selecting a track, position is zero and the overlay is closed
    #[test]
    fn select_track_resets(
        n in 1usize..20,
        ops in prop::collection::vec(arbitrary_op(), 0..30),
        target_seed in 0usize..1000,
    ) {
        let mut session = session_at(n, 0, 90);
        apply_all(&mut session, &ops);

        session.select_track(target_seed % n).unwrap();

        prop_assert_eq!(session.get_position(), Duration::ZERO);
        prop_assert!(!session.is_overlay_visible());
        prop_assert_eq!(session.get_track_index(), target_seed % n);
    }

    /// Property: seek always lands in [0, duration]
    #[test]
    fn seek_stays_in_range(secs in 1u64..3600, target in prop::num::f64::ANY) {
        let mut session = session_at(1, 0, secs);
        session.seek(target);

        prop_assert!(session.get_position() <= Duration::from_secs(secs));
    }

    /// Property: volume is always within 0-100 after any request
    #[test]
    fn volume_stays_in_range(level in any::<i32>()) {
        let mut session = session_at(1, 0, 60);
        session.set_volume(level);

        prop_assert!(session.get_volume() <= 100);
        prop_assert_eq!(session.engine().volume(), session.get_volume());
    }

    /// Property: random interaction never breaks the session invariants
    #[test]
    fn invariants_hold_under_random_ops(
        n in 1usize..10,
        ops in prop::collection::vec(arbitrary_op(), 1..60),
    ) {
        let mut session = session_at(n, 0, 100);

        for op in &ops {
            let before = session.get_track_index();
            apply(&mut session, op);

            prop_assert!(session.get_track_index() < n);
            prop_assert!(session.get_volume() <= 100);
            if session.get_duration() > Duration::ZERO {
                prop_assert!(session.get_position() <= session.get_duration());
            }
            if session.get_track_index() != before {
                prop_assert_eq!(session.get_position(), Duration::ZERO);
            }
            // Nothing here blocks playback, so the session must agree with the engine
            prop_assert_eq!(session.is_playing(), session.engine().is_playing());
        }
    }
}

/// Property: the last track's `Ended` wraps to the first and plays
#[test]
fn ended_on_last_track_wraps() {
    for n in 1..10 {
        let mut session = session_at(n, n - 1, 60);
        session.pause();

        let event = EngineEvent::new(session.generation(), EngineEventKind::Ended);
        session.handle_engine_event(event);

        assert_eq!(session.get_track_index(), 0);
        assert!(session.is_playing());
    }
}

fn apply_all(session: &mut PlaybackSession<SimulatedEngine>, ops: &[Op]) {
    for op in ops {
        apply(session, op);
    }
}

fn apply(session: &mut PlaybackSession<SimulatedEngine>, op: &Op) {
    match op {
        Op::TogglePlay => session.toggle_play(),
        Op::Next => session.next(),
        Op::Prev => session.prev(),
        Op::Select(i) => {
            let n = session.playlist().len();
            session.select_track(i % n).unwrap();
        }
        Op::Seek(secs) => session.seek(*secs),
        Op::SetVolume(level) => session.set_volume(*level),
        Op::ToggleOverlay => session.toggle_overlay(),
        Op::Advance(secs) => {
            session.engine_mut().advance(Duration::from_secs(*secs));
            session.pump_engine();
        }
        Op::Ended => {
            let event = EngineEvent::new(session.generation(), EngineEventKind::Ended);
            session.handle_engine_event(event);
        }
    }
    session.pump_engine();
}
