//! # Recommendation Service
//!
//! The layer a presentation front end talks to. It coordinates:
//! 1. Validating user and song ids
//! 2. Like/unlike mutations on the preference store
//! 3. Reading the current like history
//! 4. Calling the engine with a per-request rng
//! 5. Browse and search views over the catalog
//!
//! The catalog is shared read-only; the preference store is the only mutable
//! state and it serializes its own mutations.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use catalog::{Catalog, Genre, Song, SongId};
use engine::{EngineConfig, RecommendationEngine, RecommendationResult};
use pipeline::filters::{AlreadyLikedFilter, GenreFilter};
use pipeline::{FilterContext, FilterPipeline};

use crate::preferences::{InMemoryPreferenceStore, LikeHistory, PreferenceStore};

/// Errors returned to the presentation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// User id was empty or whitespace
    #[error("User id must not be empty")]
    EmptyUserId,

    /// Song id is not in the catalog
    #[error("Unknown song: {0}")]
    UnknownSong(SongId),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

/// Service settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Seed for genre sampling. `None` seeds from the OS.
    pub seed: Option<u64>,

    /// Engine limits
    pub engine: EngineConfig,
}

impl ServiceConfig {
    /// Fix the sampling seed (reproducible recommendations)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the engine limits
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

/// Front door for likes, recommendations and catalog views
#[derive(Clone)]
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    engine: RecommendationEngine,
    store: Arc<dyn PreferenceStore>,
    /// Source of per-request seeds
    rng: Arc<Mutex<StdRng>>,
}

impl RecommendationService {
    /// Create a service over a catalog and a preference store
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn PreferenceStore>, config: ServiceConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let engine = RecommendationEngine::new().with_config(config.engine);

        info!(
            "Recommendation service ready: {} songs, seed {:?}",
            catalog.len(),
            config.seed
        );

        Self {
            catalog,
            engine,
            store,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Create a service with a fresh in-memory preference store
    pub fn in_memory(catalog: Arc<Catalog>, config: ServiceConfig) -> Self {
        Self::new(catalog, Arc::new(InMemoryPreferenceStore::new()), config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Like a song. Returns false if the user already liked it.
    pub fn like(&self, user_id: &str, song_id: &str) -> Result<bool> {
        let user_id = validate_user(user_id)?;
        if !self.catalog.contains(song_id) {
            return Err(ServiceError::UnknownSong(song_id.to_string()));
        }

        let added = self.store.add(user_id, song_id);
        if added {
            info!("User {} liked song {}", user_id, song_id);
        }
        Ok(added)
    }

    /// Unlike a song. Returns false if the user had not liked it.
    pub fn unlike(&self, user_id: &str, song_id: &str) -> Result<bool> {
        let user_id = validate_user(user_id)?;

        let removed = self.store.remove(user_id, song_id);
        if removed {
            info!("User {} unliked song {}", user_id, song_id);
        }
        Ok(removed)
    }

    /// The user's like history, in like order
    pub fn likes(&self, user_id: &str) -> Result<LikeHistory> {
        let user_id = validate_user(user_id)?;
        Ok(self.store.get(user_id))
    }

    /// Liked songs resolved against the catalog (unknown ids skipped)
    pub fn liked_songs(&self, user_id: &str) -> Result<Vec<Song>> {
        let history = self.likes(user_id)?;
        Ok(history
            .iter()
            .filter_map(|id| self.catalog.get_song(id))
            .cloned()
            .collect())
    }

    /// Recommendations for the user's current like history
    #[instrument(skip(self))]
    pub fn recommendations(&self, user_id: &str) -> Result<RecommendationResult> {
        let user_id = validate_user(user_id)?;
        let history = self.store.get(user_id);
        Ok(self.recommend_for(history.as_slice()))
    }

    /// Recommendations for an explicit like history, bypassing the store
    pub fn recommend_for(&self, likes: &[SongId]) -> RecommendationResult {
        let start_time = Instant::now();

        let mut rng = StdRng::seed_from_u64(self.next_seed());
        let result = self.engine.recommend(likes, &self.catalog, &mut rng);

        info!(
            "Recommended {} songs ({} main, {} discovery) from {} likes in {:.2?}",
            result.combined.len(),
            result.main.len(),
            result.discovery.len(),
            likes.len(),
            start_time.elapsed()
        );
        result
    }

    /// Browse view: songs the user has not liked, optionally of one genre,
    /// in catalog order
    pub fn browse(&self, user_id: &str, genre: Option<Genre>) -> Result<Vec<Song>> {
        let history = self.likes(user_id)?;
        Ok(self.browse_for(history.as_slice(), genre))
    }

    /// Browse view for an explicit like history
    pub fn browse_for(&self, likes: &[SongId], genre: Option<Genre>) -> Vec<Song> {
        let mut pipeline = FilterPipeline::new().add_filter(AlreadyLikedFilter);
        if let Some(genre) = genre {
            pipeline = pipeline.add_filter(GenreFilter::new(genre));
        }

        let context = FilterContext::new(likes.iter().map(String::as_str));
        let songs = pipeline.apply_to_catalog(&self.catalog, &context);
        debug!("Browse ({:?}) returned {} songs", genre, songs.len());
        songs.into_iter().cloned().collect()
    }

    /// Title search over the whole catalog
    pub fn search(&self, query: &str) -> Vec<Song> {
        self.catalog
            .search_title(query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Draw a seed for one request; the lock is held only for this draw
    fn next_seed(&self) -> u64 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random()
    }
}

fn validate_user(user_id: &str) -> Result<&str> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        Err(ServiceError::EmptyUserId)
    } else {
        Ok(trimmed)
    }
}
