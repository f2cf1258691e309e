//! Filter to keep only songs of one genre.
//!
//! Backs the genre "browse" view.

use crate::traits::{FilterContext, SongFilter};
use catalog::{Genre, Song};

/// Keeps only songs of the configured genre.
pub struct GenreFilter {
    genre: Genre,
}

impl GenreFilter {
    /// Create a new GenreFilter for `genre`.
    pub fn new(genre: Genre) -> Self {
        Self { genre }
    }
}

impl SongFilter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn apply<'s>(&self, songs: Vec<&'s Song>, _context: &FilterContext<'_>) -> Vec<&'s Song> {
        songs
            .into_iter()
            .filter(|song| song.genre == self.genre)
            .collect()
    }
}
