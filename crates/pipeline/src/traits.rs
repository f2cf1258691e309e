//! Core traits for the song filtering pipeline.
//!
//! This module defines the SongFilter trait that allows composable,
//! extensible filters to be applied to a list of catalog songs.

use catalog::Song;
use std::collections::HashSet;

/// Per-request information filters decide on.
///
/// Borrows the user's liked ids rather than copying them.
#[derive(Debug, Clone, Default)]
pub struct FilterContext<'a> {
    liked: HashSet<&'a str>,
}

impl<'a> FilterContext<'a> {
    /// Build a context from a user's liked song ids
    pub fn new(liked: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            liked: liked.into_iter().collect(),
        }
    }

    /// Whether the user has liked this song
    pub fn is_liked(&self, song_id: &str) -> bool {
        self.liked.contains(song_id)
    }

    /// Number of distinct liked ids
    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }
}

/// Core trait for filtering songs.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across concurrent requests
/// - Filters take ownership of the Vec and return a filtered Vec of the same
///   borrowed songs, so nothing in the catalog is cloned
/// - Filters must keep the relative order of the songs they let through
pub trait SongFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a list of songs.
    fn apply<'s>(&self, songs: Vec<&'s Song>, context: &FilterContext<'_>) -> Vec<&'s Song>;
}
