//! Server crate for the Muse song recommender.
//!
//! This crate holds the layer around the engine: per-user like histories
//! and the service that presentation front ends call.

pub mod preferences;
pub mod service;

pub use preferences::{InMemoryPreferenceStore, LikeHistory, PreferenceStore};
pub use service::{RecommendationService, ServiceConfig, ServiceError};
