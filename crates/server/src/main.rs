//! Simple test harness for the recommendation service.
//!
//! Loads a catalog, walks one user through a few likes and logs the
//! recommendations after each step.
//!
//! Usage: `server [catalog-path]` (default `data/songs.dat`)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use catalog::{Catalog, GenrePolicy};
use engine::RecommendationResult;
use server::{RecommendationService, ServiceConfig};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,server=debug,engine=debug")),
        )
        .init();

    info!("Starting Muse service test harness");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/songs.dat"));
    let catalog = Arc::new(
        Catalog::load_from_file(&path, GenrePolicy::Skip)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
    );
    info!("Catalog loaded: {} songs", catalog.len());

    let service = RecommendationService::in_memory(catalog.clone(), ServiceConfig::default().with_seed(42));
    let user_id = "demo";

    log_recommendations("no likes yet", &service.recommendations(user_id)?);

    // Like the most viewed song, then the top song of a second genre
    let mut by_views: Vec<_> = catalog.songs().iter().collect();
    by_views.sort_by(|a, b| b.views.cmp(&a.views));
    let first = by_views.first().map(|s| (s.id.clone(), s.genre));

    if let Some((first_id, first_genre)) = first {
        service.like(user_id, &first_id)?;
        log_recommendations(&format!("liked {}", first_id), &service.recommendations(user_id)?);

        if let Some(second) = by_views.iter().find(|s| s.genre != first_genre) {
            service.like(user_id, &second.id)?;
            log_recommendations(&format!("liked {}", second.id), &service.recommendations(user_id)?);
        }

        service.unlike(user_id, &first_id)?;
        log_recommendations(&format!("unliked {}", first_id), &service.recommendations(user_id)?);
    }

    info!("Test harness finished");
    Ok(())
}

fn log_recommendations(step: &str, result: &RecommendationResult) {
    info!(
        "[{}] main={} discovery={} combined={}",
        step,
        result.main.len(),
        result.discovery.len(),
        result.combined.len()
    );
    for (i, (song, source)) in result.explain().into_iter().enumerate() {
        info!(
            "{}. {} [{}] - {} views ({:?})",
            i + 1,
            song.title,
            song.genre,
            song.views,
            source
        );
    }
}
