//! Discovery - broadening the user's taste
//!
//! Three strategies, picked by the engine:
//! - Unexplored genres: sample genres the user has not liked yet and take
//!   their most viewed songs
//! - Related genres: once nothing is left to explore, follow the genre
//!   affinity table from each liked genre
//! - New users: sample genres from the whole pool, one song each
//!
//! Genre sampling is uniform without replacement and draws from the rng the
//! caller passes in; it is the engine's only source of non-determinism.

use crate::affinity::GenreAffinity;
use crate::config::EngineConfig;
use crate::popularity::top_of_genre;
use catalog::{Genre, Song};
use rand::Rng;
use rand::seq::index;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Pick `min(count, pool.len())` distinct genres uniformly at random
///
/// The returned order is the selection order.
pub fn sample_genres<R: Rng + ?Sized>(pool: &[Genre], count: usize, rng: &mut R) -> Vec<Genre> {
    let amount = count.min(pool.len());
    if amount == 0 {
        return Vec::new();
    }

    index::sample(rng, pool.len(), amount)
        .into_iter()
        .map(|i| pool[i])
        .collect()
}

/// Genres of the exploration pool the user has not liked, in pool order
pub fn unexplored_genres(pool: &[Genre], liked_genres: &BTreeSet<Genre>) -> Vec<Genre> {
    pool.iter()
        .copied()
        .filter(|genre| !liked_genres.contains(genre))
        .collect()
}

/// Discovery from sampled unexplored genres
///
/// Songs come genre by genre in selection order, each genre's songs ranked
/// by views.
pub fn explore_unexplored<'s, R: Rng + ?Sized>(
    non_liked: &[&'s Song],
    unexplored: &[Genre],
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<&'s Song> {
    let selected = sample_genres(unexplored, config.discovery_genre_count, rng);
    debug!("Exploring unexplored genres: {:?}", selected);

    selected
        .into_iter()
        .flat_map(|genre| top_of_genre(non_liked, genre, config.discovery_per_genre))
        .collect()
}

/// Discovery through the genre affinity table
///
/// For each liked genre (canonical order), each related genre that is not
/// itself liked contributes its most viewed song. Duplicates are dropped
/// (first occurrence wins) and the list is capped.
pub fn explore_related<'s>(
    non_liked: &[&'s Song],
    liked_genres: &BTreeSet<Genre>,
    affinity: &GenreAffinity,
    config: &EngineConfig,
) -> Vec<&'s Song> {
    let mut picks: Vec<&Song> = Vec::new();

    for &genre in liked_genres {
        for &related in affinity.related(genre) {
            if liked_genres.contains(&related) {
                continue;
            }
            picks.extend(top_of_genre(non_liked, related, 1));
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    picks.retain(|song| seen.insert(song.id.as_str()));
    picks.truncate(config.related_discovery_limit);

    debug!("Related-genre discovery produced {} songs", picks.len());
    picks
}

/// Discovery for a user without likes: one top song per sampled genre
pub fn explore_for_new_user<'s, R: Rng + ?Sized>(
    non_liked: &[&'s Song],
    config: &EngineConfig,
    rng: &mut R,
) -> Vec<&'s Song> {
    let selected = sample_genres(&config.exploration_genres, config.discovery_genre_count, rng);
    debug!("Sampled starter genres: {:?}", selected);

    selected
        .into_iter()
        .flat_map(|genre| top_of_genre(non_liked, genre, 1))
        .collect()
}
