//! Result types returned by the recommendation engine.

use catalog::Song;
use serde::{Deserialize, Serialize};

/// Which list a combined recommendation came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationSource {
    /// Same genres as the user's likes
    Main,
    /// Unexplored or related genres
    Discovery,
    /// Global popularity fallback
    Popular,
}

/// Output of one `recommend` call. Built fresh each time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub main: Vec<Song>,
    pub discovery: Vec<Song>,
    /// Main, then discovery, then popular; deduplicated by id and capped
    pub combined: Vec<Song>,
    pub has_main: bool,
}

impl RecommendationResult {
    /// Where a combined entry came from. First source wins, so a song in
    /// both main and popular reports `Main`. Songs outside `combined`
    /// (including main or discovery picks cut by the limit) report `None`.
    pub fn source_of(&self, song_id: &str) -> Option<RecommendationSource> {
        if !self.combined.iter().any(|s| s.id == song_id) {
            None
        } else if self.main.iter().any(|s| s.id == song_id) {
            Some(RecommendationSource::Main)
        } else if self.discovery.iter().any(|s| s.id == song_id) {
            Some(RecommendationSource::Discovery)
        } else {
            Some(RecommendationSource::Popular)
        }
    }

    /// Combined list paired with the source of each entry
    pub fn explain(&self) -> Vec<(&Song, RecommendationSource)> {
        self.combined
            .iter()
            .map(|song| {
                let source = self
                    .source_of(&song.id)
                    .unwrap_or(RecommendationSource::Popular);
                (song, source)
            })
            .collect()
    }

    /// Source tag of each combined entry, in order
    pub fn sources(&self) -> Vec<RecommendationSource> {
        self.explain().into_iter().map(|(_, source)| source).collect()
    }
}
