//! The favorite-songs draft.
//!
//! Songs are added and removed on a draft list; nothing reaches the
//! onboarding state until the draft is committed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::onboarding::{FavoriteSong, FavoriteSongsData};
use crate::types::SongId;

/// Errors from draft operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SongDraftError {
    /// Title or artist left blank.
    #[error("Please enter both song title and artist name")]
    MissingFields,
    /// Commit attempted with no songs.
    #[error("Please add at least one favorite track")]
    Empty,
}

/// Uncommitted song list with its id sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongDraft {
    songs: Vec<FavoriteSong>,
    last_id: u64,
}

impl SongDraft {
    /// Start a draft from the committed songs.
    ///
    /// The id sequence continues after the largest numeric id already present.
    #[must_use]
    pub fn from_committed(data: &FavoriteSongsData) -> Self {
        let last_id = data
            .songs
            .iter()
            .filter_map(|song| song.id.sequence())
            .max()
            .unwrap_or(0);
        Self {
            songs: data.songs.clone(),
            last_id,
        }
    }

    /// Songs in the draft, in insertion order.
    #[must_use]
    pub fn songs(&self) -> &[FavoriteSong] {
        &self.songs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Add a song, minting its id from the current time.
    ///
    /// # Errors
    ///
    /// Returns [`SongDraftError::MissingFields`] if either field is blank.
    pub fn add_song(&mut self, title: &str, artist: &str) -> Result<&FavoriteSong, SongDraftError> {
        let now = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
        self.add_song_at(title, artist, now)
    }

    /// Add a song with an explicit clock reading in milliseconds.
    ///
    /// The id is `max(now_millis, last_id + 1)`, so ids strictly increase even
    /// when several songs are added within one millisecond or the clock
    /// steps backwards.
    ///
    /// # Errors
    ///
    /// Returns [`SongDraftError::MissingFields`] if either field is blank.
    pub fn add_song_at(
        &mut self,
        title: &str,
        artist: &str,
        now_millis: u64,
    ) -> Result<&FavoriteSong, SongDraftError> {
        let (title, artist) = (title.trim(), artist.trim());
        if title.is_empty() || artist.is_empty() {
            return Err(SongDraftError::MissingFields);
        }

        let sequence = now_millis.max(self.last_id.saturating_add(1));
        self.last_id = sequence;
        self.songs.push(FavoriteSong {
            id: SongId::from_sequence(sequence),
            title: title.to_string(),
            artist: artist.to_string(),
        });

        self.songs.last().ok_or(SongDraftError::MissingFields)
    }

    /// Remove the song with `id`. Returns whether a song was removed.
    pub fn remove_song(&mut self, id: &SongId) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| &song.id != id);
        self.songs.len() != before
    }

    /// The data to commit.
    ///
    /// # Errors
    ///
    /// Returns [`SongDraftError::Empty`] when the draft has no songs.
    pub fn commit(&self) -> Result<FavoriteSongsData, SongDraftError> {
        if self.songs.is_empty() {
            return Err(SongDraftError::Empty);
        }
        Ok(FavoriteSongsData {
            songs: self.songs.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_blank_fields_rejected() {
        let mut draft = SongDraft::default();
        assert_eq!(
            draft.add_song("", "M83").unwrap_err(),
            SongDraftError::MissingFields
        );
        assert_eq!(
            draft.add_song("Midnight City", "   ").unwrap_err(),
            SongDraftError::MissingFields
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn test_same_millisecond_adds_get_distinct_ids() {
        let mut draft = SongDraft::default();
        for i in 0..5 {
            draft.add_song_at(&format!("Song {i}"), "Artist", 1_000).unwrap();
        }
        let ids: HashSet<_> = draft.songs().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_back_to_back_adds_never_collide() {
        let mut draft = SongDraft::default();
        let first = draft.add_song("Intro", "The xx").unwrap().id.clone();
        let second = draft.add_song("Teardrop", "Massive Attack").unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut draft = SongDraft::default();
        let a = draft.add_song_at("A", "X", 5_000).unwrap().id.clone();
        let b = draft.add_song_at("B", "X", 4_000).unwrap().id.clone();
        assert_eq!(a.sequence(), Some(5_000));
        assert_eq!(b.sequence(), Some(5_001));
    }

    #[test]
    fn test_remove_by_id() {
        let mut draft = SongDraft::default();
        let id = draft.add_song_at("A", "X", 10).unwrap().id.clone();
        draft.add_song_at("B", "Y", 11).unwrap();

        assert!(!draft.remove_song(&SongId::from("missing")));
        assert_eq!(draft.len(), 2);

        assert!(draft.remove_song(&id));
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.songs()[0].title, "B");
    }

    #[test]
    fn test_commit_requires_a_song() {
        let mut draft = SongDraft::default();
        assert_eq!(draft.commit().unwrap_err(), SongDraftError::Empty);

        draft.add_song_at("Midnight City", "M83", 1).unwrap();
        let data = draft.commit().unwrap();
        assert_eq!(data.songs.len(), 1);
        assert_eq!(data.songs[0].artist, "M83");
    }

    #[test]
    fn test_from_committed_continues_sequence() {
        let mut draft = SongDraft::default();
        draft.add_song_at("A", "X", 9_000).unwrap();
        let committed = draft.commit().unwrap();

        let mut resumed = SongDraft::from_committed(&committed);
        let id = resumed.add_song_at("B", "Y", 100).unwrap().id.clone();
        assert_eq!(id.sequence(), Some(9_001));
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut draft = SongDraft::default();
        let song = draft.add_song_at("  Intro ", " The xx ", 1).unwrap();
        assert_eq!(song.title, "Intro");
        assert_eq!(song.artist, "The xx");
    }
}
