//! Property-style tests for the recommendation engine.
//!
//! Each property is checked over many seeds and like histories drawn from a
//! catalog that covers every genre with uneven popularity.

use catalog::{Catalog, Genre, Song, SongId};
use engine::{EngineConfig, RecommendationEngine};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

fn create_test_catalog() -> Catalog {
    let mut songs = Vec::new();
    for (g, &genre) in Genre::ALL.iter().enumerate() {
        for n in 0..6 {
            let views = ((g * 37 + n * 101) % 500) as u64;
            songs.push(Song::new(
                format!("{}-{}", genre, n),
                format!("{} track {}", genre, n),
                genre,
                views,
            ));
        }
    }
    Catalog::from_songs(songs).unwrap()
}

/// Random like histories, including ids missing from the catalog
fn like_histories(catalog: &Catalog, count: usize) -> Vec<Vec<SongId>> {
    let mut rng = StdRng::seed_from_u64(1234);
    let ids: Vec<SongId> = catalog.songs().iter().map(|s| s.id.clone()).collect();

    (0..count)
        .map(|i| {
            let mut history: Vec<SongId> = ids
                .choose_multiple(&mut rng, i % 15)
                .cloned()
                .collect();
            if i % 7 == 0 {
                history.push("not-in-catalog".to_string());
            }
            history
        })
        .collect()
}

#[test]
fn test_liked_songs_never_in_main_or_discovery() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for (seed, history) in like_histories(&catalog, 60).into_iter().enumerate() {
        let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(seed as u64));
        let liked: HashSet<&SongId> = history.iter().collect();

        for song in result.main.iter().chain(&result.discovery) {
            assert!(!liked.contains(&song.id), "liked song {} was recommended", song.id);
        }
    }
}

#[test]
fn test_combined_unique_and_bounded() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for (seed, history) in like_histories(&catalog, 60).into_iter().enumerate() {
        let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(seed as u64));

        assert!(result.combined.len() <= 15);
        let unique: HashSet<&str> = result.combined.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(unique.len(), result.combined.len());
    }
}

#[test]
fn test_main_genre_cap() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for (seed, history) in like_histories(&catalog, 60).into_iter().enumerate() {
        let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(seed as u64));

        let mut per_genre: HashMap<Genre, usize> = HashMap::new();
        for song in &result.main {
            *per_genre.entry(song.genre).or_default() += 1;
        }
        assert!(per_genre.values().all(|&n| n <= 2));
        assert!(result.main.len() <= 5);
        assert_eq!(result.has_main, !result.main.is_empty());
    }
}

#[test]
fn test_combined_starts_with_main_then_discovery() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for (seed, history) in like_histories(&catalog, 30).into_iter().enumerate() {
        let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(seed as u64));

        let mut expected: Vec<&str> = Vec::new();
        for song in result.main.iter().chain(&result.discovery) {
            if !expected.contains(&song.id.as_str()) {
                expected.push(song.id.as_str());
            }
        }
        expected.truncate(15);

        let prefix: Vec<&str> = result
            .combined
            .iter()
            .take(expected.len())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(prefix, expected);
    }
}

#[test]
fn test_no_likes_means_no_main() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for seed in 0..25 {
        let result = engine.recommend(&[], &catalog, &mut StdRng::seed_from_u64(seed));
        assert!(result.main.is_empty());
        assert!(!result.has_main);
        assert_eq!(result.discovery.len(), 2);
        assert_eq!(result.combined.len(), 15);
    }
}

#[test]
fn test_likes_with_remaining_songs_give_main() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();
    let history = vec!["Jazz-0".to_string()];

    let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(3));

    assert!(result.has_main);
    assert_eq!(result.main.len(), 2);
    assert!(result.main.iter().all(|s| s.genre == Genre::Jazz));
    // Two unexplored genres, two songs each
    assert_eq!(result.discovery.len(), 4);
    assert!(result.discovery.iter().all(|s| s.genre != Genre::Jazz));
}

#[test]
fn test_seeded_calls_are_idempotent() {
    let catalog = create_test_catalog();
    let engine = RecommendationEngine::new();

    for history in like_histories(&catalog, 20) {
        let first = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(99));
        let second = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}

#[test]
fn test_inputs_are_not_mutated() {
    let catalog = create_test_catalog();
    let before: Vec<Song> = catalog.songs().to_vec();
    let history = vec!["Rock-1".to_string(), "Pop-2".to_string()];
    let history_before = history.clone();

    let engine = RecommendationEngine::new().with_config(EngineConfig::default().with_combined_limit(5));
    let result = engine.recommend(&history, &catalog, &mut StdRng::seed_from_u64(0));

    assert_eq!(result.combined.len(), 5);
    assert_eq!(catalog.songs(), before.as_slice());
    assert_eq!(history, history_before);
}
