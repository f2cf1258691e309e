//! Song filtering pipeline.
//!
//! This crate provides:
//! - SongFilter trait and implementations for narrowing down catalog songs
//! - FilterPipeline for composing filters
//!
//! ## Architecture
//! Filters borrow songs from the catalog and pass them along in catalog
//! order. The recommender uses the pipeline to drop already-liked songs;
//! the browse view adds a genre filter on top.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterContext, FilterPipeline};
//! use pipeline::filters::*;
//!
//! let context = FilterContext::new(likes.iter().map(String::as_str));
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyLikedFilter)
//!     .add_filter(GenreFilter::new(Genre::Rock));
//!
//! let browse = pipeline.apply_to_catalog(&catalog, &context);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;

// Re-export main types
pub use traits::{FilterContext, SongFilter};
pub use filter_pipeline::FilterPipeline;
