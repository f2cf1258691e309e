//! # Recommendation Engine
//!
//! Turns a like history into main, discovery and combined lists:
//! 1. Drop already-liked songs from the catalog
//! 2. Rank the rest by views for the popularity fallback
//! 3. With likes: diversity-capped main picks plus discovery from
//!    unexplored (or, failing that, related) genres.
//!    Without likes: discovery from sampled genres only.
//! 4. Merge main, discovery and popular into the combined list
//!
//! The engine is pure: it never mutates the catalog or the history and the
//! only randomness comes from the rng passed to `recommend`.

use std::sync::Arc;
use std::time::Instant;

use catalog::{Catalog, Song, SongId};
use pipeline::FilterPipeline;
use pipeline::filters::AlreadyLikedFilter;
use rand::Rng;
use tracing::{debug, instrument};

use crate::affinity::GenreAffinity;
use crate::config::EngineConfig;
use crate::discovery;
use crate::like_context::build_like_context;
use crate::main_picks::select_main;
use crate::merge::merge_dedup;
use crate::popularity::top_by_views;
use crate::types::RecommendationResult;

/// Stateless recommendation policy. Cheap to clone and safe to share.
#[derive(Clone)]
pub struct RecommendationEngine {
    affinity: GenreAffinity,
    config: EngineConfig,
    /// Removes liked songs before any selection
    partition: Arc<FilterPipeline>,
}

impl RecommendationEngine {
    /// Create an engine with the default affinity table and limits
    pub fn new() -> Self {
        Self::with_parts(GenreAffinity::default(), EngineConfig::default())
    }

    /// Create an engine from an explicit affinity table and config
    pub fn with_parts(affinity: GenreAffinity, config: EngineConfig) -> Self {
        Self {
            affinity,
            config,
            partition: Arc::new(FilterPipeline::new().add_filter(AlreadyLikedFilter)),
        }
    }

    /// Replace the affinity table (builder pattern)
    pub fn with_affinity(mut self, affinity: GenreAffinity) -> Self {
        self.affinity = affinity;
        self
    }

    /// Replace the config (builder pattern)
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn affinity(&self) -> &GenreAffinity {
        &self.affinity
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Catalog songs the user has not liked, in catalog order
    pub fn non_liked<'s>(&self, likes: &[SongId], catalog: &'s Catalog) -> Vec<&'s Song> {
        let context = build_like_context(likes, catalog);
        self.partition.apply_to_catalog(catalog, &context.filter)
    }

    /// Popularity fallback: the most viewed non-liked songs
    pub fn popular<'s>(&self, likes: &[SongId], catalog: &'s Catalog) -> Vec<&'s Song> {
        top_by_views(&self.non_liked(likes, catalog), self.config.popular_limit)
    }

    /// Build recommendations for one like history
    #[instrument(skip_all, fields(likes = likes.len(), catalog = catalog.len()))]
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        likes: &[SongId],
        catalog: &Catalog,
        rng: &mut R,
    ) -> RecommendationResult {
        let start_time = Instant::now();

        // Step 1: partition
        let context = build_like_context(likes, catalog);
        let non_liked = self.partition.apply_to_catalog(catalog, &context.filter);
        if context.unresolved > 0 {
            debug!(
                "{} liked ids are not in the catalog and were skipped",
                context.unresolved
            );
        }

        // Step 2: popularity fallback
        let popular = top_by_views(&non_liked, self.config.popular_limit);

        // Step 3: main and discovery
        let (main, discovery) = if context.has_likes() {
            let main = select_main(&non_liked, &context.liked_genres, &self.config);

            let unexplored =
                discovery::unexplored_genres(&self.config.exploration_genres, &context.liked_genres);
            let discovery = if unexplored.is_empty() {
                discovery::explore_related(
                    &non_liked,
                    &context.liked_genres,
                    &self.affinity,
                    &self.config,
                )
            } else {
                discovery::explore_unexplored(&non_liked, &unexplored, &self.config, rng)
            };
            (main, discovery)
        } else {
            (Vec::new(), discovery::explore_for_new_user(&non_liked, &self.config, rng))
        };

        // Step 4: merge
        let combined = merge_dedup(
            &[main.as_slice(), discovery.as_slice(), popular.as_slice()],
            self.config.combined_limit,
        );

        debug!(
            "main={} discovery={} popular={} combined={} in {:.2?}",
            main.len(),
            discovery.len(),
            popular.len(),
            combined.len(),
            start_time.elapsed()
        );

        // Step 5: result
        RecommendationResult {
            has_main: !main.is_empty(),
            main: main.into_iter().cloned().collect(),
            discovery: discovery.into_iter().cloned().collect(),
            combined: combined.into_iter().cloned().collect(),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
