//! # Engine Crate
//!
//! The song recommendation policy.
//!
//! ## Components
//!
//! ### Main picks
//! Exploitation: the most viewed songs from genres the user already likes,
//! at most 2 per genre and 5 in total.
//!
//! ### Discovery
//! Exploration: top songs from randomly sampled genres the user has not
//! liked yet; once every genre is liked, top songs of related genres from
//! the genre affinity table.
//!
//! ### Popularity fallback
//! The top 20 non-liked songs by views, used to fill the combined list.
//!
//! ## Example Usage
//!
//! ```ignore
//! use engine::RecommendationEngine;
//! use rand::SeedableRng;
//!
//! let engine = RecommendationEngine::new();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//!
//! let result = engine.recommend(&likes, &catalog, &mut rng);
//! for (song, source) in result.explain() {
//!     println!("{} [{:?}]", song.title, source);
//! }
//! ```

// Public modules
pub mod affinity;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod like_context;
pub mod main_picks;
pub mod merge;
pub mod popularity;
pub mod types;

// Re-export commonly used types
pub use affinity::GenreAffinity;
pub use config::EngineConfig;
pub use engine::RecommendationEngine;
pub use like_context::{LikeContext, build_like_context};
pub use types::{RecommendationResult, RecommendationSource};
