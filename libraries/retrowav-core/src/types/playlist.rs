//! Immutable ordered track list

use super::Track;
use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::sync::Arc;

/// Non-empty, immutable, ordered list of tracks
///
/// Cloning is cheap (shared storage). Index arithmetic wraps, so navigation
/// can never leave `[0, len)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Track>", into = "Vec<Track>")]
pub struct Playlist {
    tracks: Arc<[Track]>,
}

impl Playlist {
    /// Build a playlist, rejecting an empty track list
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            return Err(CoreError::EmptyPlaylist);
        }
        Ok(Self {
            tracks: tracks.into(),
        })
    }

    /// Number of tracks (always >= 1)
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    /// Index after `index`, wrapping to the first track
    pub fn next_index(&self, index: usize) -> usize {
        (index % self.len() + 1) % self.len()
    }

    /// Index before `index`, wrapping to the last track
    pub fn prev_index(&self, index: usize) -> usize {
        let n = self.len();
        (index % n + n - 1) % n
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.len()
    }
}

impl Index<usize> for Playlist {
    type Output = Track;

    fn index(&self, index: usize) -> &Track {
        &self.tracks[index]
    }
}

impl TryFrom<Vec<Track>> for Playlist {
    type Error = CoreError;

    fn try_from(tracks: Vec<Track>) -> Result<Self> {
        Self::new(tracks)
    }
}

impl From<Playlist> for Vec<Track> {
    fn from(playlist: Playlist) -> Self {
        playlist.tracks.to_vec()
    }
}

impl<'a> IntoIterator for &'a Playlist {
    type Item = &'a Track;
    type IntoIter = std::slice::Iter<'a, Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColorTag;

    fn playlist(n: usize) -> Playlist {
        Playlist::new(
            (0..n)
                .map(|i| Track::new(format!("t{i}"), "a", format!("/t{i}.mp3"), ColorTag::Primary))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn empty_playlist_rejected() {
        assert_eq!(Playlist::new(vec![]), Err(CoreError::EmptyPlaylist));
    }

    #[test]
    fn next_wraps_to_first() {
        let p = playlist(3);
        assert_eq!(p.next_index(0), 1);
        assert_eq!(p.next_index(2), 0);
    }

    #[test]
    fn prev_wraps_to_last() {
        let p = playlist(3);
        assert_eq!(p.prev_index(0), 2);
        assert_eq!(p.prev_index(2), 1);
    }

    #[test]
    fn single_track_wraps_onto_itself() {
        let p = playlist(1);
        assert_eq!(p.next_index(0), 0);
        assert_eq!(p.prev_index(0), 0);
    }

    #[test]
    fn deserializing_empty_list_fails() {
        let result: std::result::Result<Playlist, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn clone_shares_storage() {
        let p = playlist(2);
        let q = p.clone();
        assert!(Arc::ptr_eq(&p.tracks, &q.tracks));
    }
}
