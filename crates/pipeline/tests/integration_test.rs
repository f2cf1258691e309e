//! Integration tests for the pipeline.
//!
//! These tests verify that the built-in filters and user-defined filters
//! compose over a realistic catalog.

use catalog::{Catalog, Genre, Song};
use pipeline::filters::*;
use pipeline::{FilterContext, FilterPipeline, SongFilter};

/// A filter defined outside the crate, to check the trait is usable as an
/// extension point
struct MinViewsFilter {
    min_views: u64,
}

impl SongFilter for MinViewsFilter {
    fn name(&self) -> &str {
        "MinViewsFilter"
    }

    fn apply<'s>(&self, songs: Vec<&'s Song>, _context: &FilterContext<'_>) -> Vec<&'s Song> {
        songs
            .into_iter()
            .filter(|s| s.views >= self.min_views)
            .collect()
    }
}

fn create_test_catalog() -> Catalog {
    Catalog::from_songs(vec![
        Song::new("r1", "Everlong", Genre::Rock, 650),
        Song::new("j1", "Take Five", Genre::Jazz, 300),
        Song::new("r2", "Black Hole Sun", Genre::Rock, 120),
        Song::new("p1", "Levitating", Genre::Pop, 900),
        Song::new("r3", "Paranoid Android", Genre::Rock, 600),
        Song::new("j2", "So What", Genre::Jazz, 250),
    ])
    .unwrap()
}

fn ids(songs: &[&Song]) -> Vec<String> {
    songs.iter().map(|s| s.id.clone()).collect()
}

#[test]
fn test_browse_style_pipeline() {
    let catalog = create_test_catalog();
    let likes = vec!["r1".to_string(), "j1".to_string()];
    let context = FilterContext::new(likes.iter().map(String::as_str));

    let pipeline = FilterPipeline::new()
        .add_filter(AlreadyLikedFilter)
        .add_filter(GenreFilter::new(Genre::Rock));

    let songs = pipeline.apply_to_catalog(&catalog, &context);

    // Catalog order is kept, liked songs are gone
    assert_eq!(ids(&songs), vec!["r2", "r3"]);
}

#[test]
fn test_custom_filter_in_pipeline() {
    let catalog = create_test_catalog();
    let context = FilterContext::new(["p1"]);

    let pipeline = FilterPipeline::new()
        .add_filter(MinViewsFilter { min_views: 280 })
        .add_filter(AlreadyLikedFilter);

    let songs = pipeline.apply_to_catalog(&catalog, &context);

    assert_eq!(ids(&songs), vec!["r1", "j1", "r3"]);
}

#[test]
fn test_filter_order_does_not_change_result() {
    let catalog = create_test_catalog();
    let context = FilterContext::new(["j2", "r3"]);

    let liked_first = FilterPipeline::new()
        .add_filter(AlreadyLikedFilter)
        .add_filter(GenreFilter::new(Genre::Jazz));
    let genre_first = FilterPipeline::new()
        .add_filter(GenreFilter::new(Genre::Jazz))
        .add_filter(AlreadyLikedFilter);

    assert_eq!(
        ids(&liked_first.apply_to_catalog(&catalog, &context)),
        ids(&genre_first.apply_to_catalog(&catalog, &context))
    );
}

#[test]
fn test_everything_filtered_out() {
    let catalog = create_test_catalog();
    let context = FilterContext::new(catalog.songs().iter().map(|s| s.id.as_str()));

    let pipeline = FilterPipeline::new().add_filter(AlreadyLikedFilter);

    assert!(pipeline.apply_to_catalog(&catalog, &context).is_empty());
    assert_eq!(context.liked_count(), 6);
}
