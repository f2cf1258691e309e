//! Helper to build a LikeContext from a like history and the catalog
//!
//! Resolves the user's liked ids against the catalog once, up front, so the
//! selection steps only deal with sets.

use catalog::{Catalog, Genre, SongId};
use pipeline::FilterContext;
use std::collections::BTreeSet;

/// Everything the engine derives from a user's like history
#[derive(Debug, Clone)]
pub struct LikeContext<'a> {
    /// Liked ids, for the already-liked filter
    pub filter: FilterContext<'a>,

    /// Genres of the liked songs found in the catalog.
    ///
    /// A BTreeSet so iteration follows canonical genre order.
    pub liked_genres: BTreeSet<Genre>,

    /// Entries in the like history
    pub history_len: usize,

    /// Liked ids that are not in the catalog
    pub unresolved: usize,
}

impl LikeContext<'_> {
    /// Whether the user has liked anything at all, resolvable or not
    pub fn has_likes(&self) -> bool {
        self.history_len > 0
    }
}

/// Build a LikeContext for a like history
///
/// Ids not present in the catalog are skipped when deriving liked genres;
/// they contribute nothing and are not an error.
pub fn build_like_context<'a>(likes: &'a [SongId], catalog: &Catalog) -> LikeContext<'a> {
    let mut liked_genres = BTreeSet::new();
    let mut unresolved = 0;

    for song_id in likes {
        match catalog.get_song(song_id) {
            Some(song) => {
                liked_genres.insert(song.genre);
            }
            None => unresolved += 1,
        }
    }

    LikeContext {
        filter: FilterContext::new(likes.iter().map(String::as_str)),
        liked_genres,
        history_len: likes.len(),
        unresolved,
    }
}
