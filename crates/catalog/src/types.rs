//! Core domain types for the song catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Type aliases for domain clarity (SongId, UserId)
//! - The closed `Genre` enum the recommender understands
//! - `Song`, an immutable catalog record
//! - `Catalog`, the in-memory song store with its lookup indices

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a song within a catalog
pub type SongId = String;

/// Identifier of a user interacting with the recommender
pub type UserId = String;

// =============================================================================
// Genre
// =============================================================================

/// The fixed set of genres the recommender understands.
///
/// A song whose genre is not one of these never makes it into a `Catalog`.
/// Serialized with the canonical names used in catalog files (`Hip_Hop`, `K_Pop`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    Pop,
    Rock,
    Electronica,
    Jazz,
    #[serde(rename = "Hip_Hop")]
    HipHop,
    Metal,
    Reggaeton,
    Salsa,
    Country,
    Blues,
    #[serde(rename = "K_Pop")]
    KPop,
    Indie,
}

impl Genre {
    /// Every genre, in canonical order
    pub const ALL: [Genre; 12] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Electronica,
        Genre::Jazz,
        Genre::HipHop,
        Genre::Metal,
        Genre::Reggaeton,
        Genre::Salsa,
        Genre::Country,
        Genre::Blues,
        Genre::KPop,
        Genre::Indie,
    ];

    /// Canonical name, as written in catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Pop => "Pop",
            Genre::Rock => "Rock",
            Genre::Electronica => "Electronica",
            Genre::Jazz => "Jazz",
            Genre::HipHop => "Hip_Hop",
            Genre::Metal => "Metal",
            Genre::Reggaeton => "Reggaeton",
            Genre::Salsa => "Salsa",
            Genre::Country => "Country",
            Genre::Blues => "Blues",
            Genre::KPop => "K_Pop",
            Genre::Indie => "Indie",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and drop separators so "Hip Hop", "hip-hop" and "Hip_Hop" compare equal
fn normalize_genre_name(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Genre {
    type Err = CatalogError;

    /// Parse a genre name
    ///
    /// Example: "Hip_Hop" -> Ok(Genre::HipHop)
    ///          "k-pop"   -> Ok(Genre::KPop)
    ///          "Polka"   -> Err(InvalidValue)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_genre_name(s.trim());
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| normalize_genre_name(genre.as_str()) == wanted)
            .ok_or_else(|| CatalogError::InvalidValue {
                field: "genre".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Song
// =============================================================================

/// A song in the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub genre: Genre,
    /// Static popularity proxy, not live-updated
    pub views: u64,
}

impl Song {
    pub fn new(
        id: impl Into<SongId>,
        title: impl Into<String>,
        genre: Genre,
        views: u64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            genre,
            views,
        }
    }
}

// =============================================================================
// Catalog - The In-Memory Song Store
// =============================================================================

/// Ordered collection of songs with lookup indices.
///
/// Catalog order is load order and is what every "stable" sort in the
/// recommender falls back on. Methods return references into the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Songs in catalog order
    pub(crate) songs: Vec<Song>,

    /// Position of each song in `songs`
    pub(crate) id_index: HashMap<SongId, usize>,

    /// Positions of the songs of each genre, in catalog order
    pub(crate) genre_index: HashMap<Genre, Vec<usize>>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a song by ID
    pub fn get_song(&self, id: &str) -> Option<&Song> {
        self.id_index.get(id).map(|&pos| &self.songs[pos])
    }

    /// Whether a song with this ID exists
    pub fn contains(&self, id: &str) -> bool {
        self.id_index.contains_key(id)
    }

    /// All songs, in catalog order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Songs of one genre, in catalog order
    pub fn songs_by_genre(&self, genre: Genre) -> impl Iterator<Item = &Song> + '_ {
        self.genre_index
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&pos| &self.songs[pos])
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Insert a song at the end of the catalog and update indices
    ///
    /// Fails with `ValidationError` if a song with the same ID already exists.
    pub fn insert_song(&mut self, song: Song) -> Result<(), CatalogError> {
        if self.id_index.contains_key(&song.id) {
            return Err(CatalogError::ValidationError(format!(
                "duplicate song id: {}",
                song.id
            )));
        }

        let pos = self.songs.len();
        self.id_index.insert(song.id.clone(), pos);
        self.genre_index.entry(song.genre).or_default().push(pos);
        self.songs.push(song);
        Ok(())
    }

    /// Number of songs per genre, in canonical genre order (zeros included)
    pub fn genre_counts(&self) -> Vec<(Genre, usize)> {
        Genre::ALL
            .iter()
            .map(|&genre| {
                let count = self.genre_index.get(&genre).map_or(0, |v| v.len());
                (genre, count)
            })
            .collect()
    }
}
