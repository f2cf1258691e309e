//! Main picks - more of what the user already likes
//!
//! ## Algorithm
//! 1. Keep non-liked songs whose genre is one of the liked genres
//! 2. Rank them by views (stable)
//! 3. Walk the ranking, admitting a song only while its genre has fewer
//!    than `per_genre_cap` admissions
//! 4. Stop at `main_limit` songs or when the ranking runs out
//!
//! The cap keeps a single dominant genre from filling the whole block.

use crate::config::EngineConfig;
use crate::popularity::sort_by_views;
use catalog::{Genre, Song};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Select the diversity-capped main list
pub fn select_main<'s>(
    non_liked: &[&'s Song],
    liked_genres: &BTreeSet<Genre>,
    config: &EngineConfig,
) -> Vec<&'s Song> {
    let mut candidates: Vec<&Song> = non_liked
        .iter()
        .copied()
        .filter(|song| liked_genres.contains(&song.genre))
        .collect();
    sort_by_views(&mut candidates);

    let mut per_genre: HashMap<Genre, usize> = HashMap::new();
    let mut main = Vec::with_capacity(config.main_limit);

    for song in candidates.iter().copied() {
        if main.len() >= config.main_limit {
            break;
        }
        let count = per_genre.entry(song.genre).or_insert(0);
        if *count < config.per_genre_cap {
            *count += 1;
            main.push(song);
        }
    }

    debug!(
        "Selected {} main songs from {} candidates",
        main.len(),
        candidates.len()
    );
    main
}
