//! Per-user like histories.
//!
//! The engine only ever reads a history; this module owns the mutation side.
//! Each like/unlike is applied atomically under the store's lock, so a read
//! always reflects the latest completed mutation for that user.

use catalog::{SongId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Ordered, duplicate-free list of liked song ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeHistory {
    songs: Vec<SongId>,
}

impl LikeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a song. Returns false if it was already liked.
    pub fn like(&mut self, song_id: impl Into<SongId>) -> bool {
        let song_id = song_id.into();
        if self.contains(&song_id) {
            return false;
        }
        self.songs.push(song_id);
        true
    }

    /// Remove a song. Returns false if it was not liked.
    pub fn unlike(&mut self, song_id: &str) -> bool {
        match self.songs.iter().position(|id| id == song_id) {
            Some(pos) => {
                self.songs.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, song_id: &str) -> bool {
        self.songs.iter().any(|id| id == song_id)
    }

    pub fn as_slice(&self) -> &[SongId] {
        &self.songs
    }

    pub fn iter(&self) -> impl Iterator<Item = &SongId> {
        self.songs.iter()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl<S: Into<SongId>> FromIterator<S> for LikeHistory {
    /// Collect ids into a history, dropping repeats
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut history = LikeHistory::new();
        for id in iter {
            history.like(id);
        }
        history
    }
}

/// Storage for like histories.
///
/// Implementations must make each `add`/`remove` atomic per user.
pub trait PreferenceStore: Send + Sync {
    /// Current history of a user; empty if the user is unknown
    fn get(&self, user_id: &str) -> LikeHistory;

    /// Like a song. Returns false if it was already liked.
    fn add(&self, user_id: &str, song_id: &str) -> bool;

    /// Unlike a song. Returns false if it was not liked.
    fn remove(&self, user_id: &str, song_id: &str) -> bool;
}

/// Process-lifetime store backed by a map behind an RwLock
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    histories: RwLock<HashMap<UserId, LikeHistory>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a history
    pub fn user_count(&self) -> usize {
        self.histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

// A poisoned lock still holds consistent data: every mutation is a single
// push or remove on one history.
impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, user_id: &str) -> LikeHistory {
        self.histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    fn add(&self, user_id: &str, song_id: &str) -> bool {
        self.histories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id.to_string())
            .or_default()
            .like(song_id)
    }

    fn remove(&self, user_id: &str, song_id: &str) -> bool {
        self.histories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(user_id)
            .is_some_and(|history| history.unlike(song_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_like_history_order_and_uniqueness() {
        let mut history = LikeHistory::new();
        assert!(history.like("b"));
        assert!(history.like("a"));
        assert!(!history.like("b"));
        assert_eq!(history.as_slice(), &["b".to_string(), "a".to_string()]);

        assert!(history.unlike("b"));
        assert!(!history.unlike("b"));
        assert_eq!(history.len(), 1);
        assert!(history.contains("a"));
    }

    #[test]
    fn test_history_from_iter_drops_repeats() {
        let history: LikeHistory = ["x", "y", "x"].into_iter().collect();
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_store_add_get_remove() {
        let store = InMemoryPreferenceStore::new();
        assert!(store.get("alice").is_empty());

        assert!(store.add("alice", "s1"));
        assert!(store.add("alice", "s2"));
        assert!(!store.add("alice", "s1"));
        assert_eq!(store.get("alice").len(), 2);
        assert!(store.get("bob").is_empty());

        assert!(store.remove("alice", "s1"));
        assert!(!store.remove("alice", "s1"));
        assert_eq!(store.get("alice").as_slice(), &["s2".to_string()]);
    }

    #[test]
    fn test_remove_for_unknown_user_creates_nothing() {
        let store = InMemoryPreferenceStore::new();
        assert!(!store.remove("ghost", "s1"));
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn test_concurrent_likes() {
        let store = Arc::new(InMemoryPreferenceStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50 {
                        store.add("shared", &format!("song-{}", (t * 50 + i) % 100));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 100 distinct ids, each liked once
        assert_eq!(store.get("shared").len(), 100);
    }
}
