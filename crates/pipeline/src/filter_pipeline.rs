//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::{FilterContext, SongFilter};
use catalog::{Catalog, Song};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyLikedFilter)
///     .add_filter(GenreFilter::new(Genre::Jazz));
///
/// let songs = pipeline.apply_to_catalog(&catalog, &context);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn SongFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl SongFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the songs.
    ///
    /// ## Algorithm
    /// 1. Start with the input songs
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered list (relative order untouched)
    pub fn apply<'s>(&self, songs: Vec<&'s Song>, context: &FilterContext<'_>) -> Vec<&'s Song> {
        let mut current = songs;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, context);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Apply the pipeline to every song of a catalog, in catalog order
    pub fn apply_to_catalog<'s>(
        &self,
        catalog: &'s Catalog,
        context: &FilterContext<'_>,
    ) -> Vec<&'s Song> {
        self.apply(catalog.songs().iter().collect(), context)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
