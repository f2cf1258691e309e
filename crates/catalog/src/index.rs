//! Catalog building, loading and querying.
//!
//! - Load a catalog file into a validated `Catalog`
//! - Build a catalog from already-parsed songs
//! - Title search over the loaded songs

use crate::error::Result;
use crate::parser::{self, GenrePolicy};
use crate::types::*;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load a catalog from a `::`-separated song file
    ///
    /// Steps:
    /// 1. Parse every line (in parallel), applying the genre policy
    /// 2. Insert songs in file order, rejecting duplicate ids
    pub fn load_from_file(path: &Path, policy: GenrePolicy) -> Result<Self> {
        info!("Loading song catalog from {:?}", path);

        let songs = parser::parse_songs(path, policy)?;
        let catalog = Self::from_songs(songs)?;

        info!(
            "Loaded {} songs across {} genres",
            catalog.len(),
            catalog.genre_counts().iter().filter(|(_, n)| *n > 0).count()
        );
        Ok(catalog)
    }

    /// Build a catalog from songs, keeping their order
    ///
    /// Returns `ValidationError` on the first duplicate id.
    pub fn from_songs(songs: impl IntoIterator<Item = Song>) -> Result<Self> {
        let mut catalog = Catalog::new();
        for song in songs {
            catalog.insert_song(song)?;
        }
        Ok(catalog)
    }

    /// Case-insensitive title search
    ///
    /// Exact title matches come first, then substring matches; within each
    /// group songs are ordered by views (highest first), ties in catalog order.
    pub fn search_title(&self, query: &str) -> Vec<&Song> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<(u8, &Song)> = self
            .songs
            .iter()
            .filter_map(|song| {
                let title_lower = song.title.to_lowercase();
                if title_lower == query_lower {
                    Some((0, song))
                } else if title_lower.contains(&query_lower) {
                    Some((1, song))
                } else {
                    None
                }
            })
            .collect();

        // sort_by is stable, so equal keys keep catalog order
        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.views.cmp(&a.1.views)));
        matches.into_iter().map(|(_, song)| song).collect()
    }
}
