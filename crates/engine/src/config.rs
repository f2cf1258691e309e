//! Tunable limits for the recommendation policy.

use catalog::Genre;
use serde::{Deserialize, Serialize};

/// Numeric policy knobs for the engine.
///
/// `Default` gives the production policy: 5 main picks with at most 2 per
/// genre, 2 exploration genres with 2 songs each, at most 4 related-genre
/// picks, a top-20 popularity fallback and a combined list of 15.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum size of the main list
    pub main_limit: usize,

    /// Maximum songs of one genre in the main list
    pub per_genre_cap: usize,

    /// How many unexplored genres to sample for discovery
    pub discovery_genre_count: usize,

    /// Songs taken from each sampled genre (users with likes)
    pub discovery_per_genre: usize,

    /// Maximum related-genre picks once every genre is explored
    pub related_discovery_limit: usize,

    /// Size of the popularity fallback list
    pub popular_limit: usize,

    /// Maximum size of the combined list
    pub combined_limit: usize,

    /// Genres eligible for exploration. Defaults to every genre.
    pub exploration_genres: Vec<Genre>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            main_limit: 5,
            per_genre_cap: 2,
            discovery_genre_count: 2,
            discovery_per_genre: 2,
            related_discovery_limit: 4,
            popular_limit: 20,
            combined_limit: 15,
            exploration_genres: Genre::ALL.to_vec(),
        }
    }
}

impl EngineConfig {
    /// Configure the main list size (default: 5)
    pub fn with_main_limit(mut self, limit: usize) -> Self {
        self.main_limit = limit;
        self
    }

    /// Configure the per-genre cap in the main list (default: 2)
    pub fn with_per_genre_cap(mut self, cap: usize) -> Self {
        self.per_genre_cap = cap;
        self
    }

    /// Configure how many genres discovery samples (default: 2)
    pub fn with_discovery_genre_count(mut self, count: usize) -> Self {
        self.discovery_genre_count = count;
        self
    }

    /// Configure songs per sampled discovery genre (default: 2)
    pub fn with_discovery_per_genre(mut self, count: usize) -> Self {
        self.discovery_per_genre = count;
        self
    }

    /// Configure the related-genre discovery cap (default: 4)
    pub fn with_related_discovery_limit(mut self, limit: usize) -> Self {
        self.related_discovery_limit = limit;
        self
    }

    /// Configure the popularity fallback size (default: 20)
    pub fn with_popular_limit(mut self, limit: usize) -> Self {
        self.popular_limit = limit;
        self
    }

    /// Configure the combined list size (default: 15)
    pub fn with_combined_limit(mut self, limit: usize) -> Self {
        self.combined_limit = limit;
        self
    }

    /// Restrict the genres discovery may explore (default: all genres)
    ///
    /// Duplicates are dropped; order is kept since it drives sampling.
    pub fn with_exploration_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        let mut pool: Vec<Genre> = Vec::new();
        for genre in genres {
            if !pool.contains(&genre) {
                pool.push(genre);
            }
        }
        self.exploration_genres = pool;
        self
    }
}
