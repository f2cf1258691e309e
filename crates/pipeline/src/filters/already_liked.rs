//! Filter to remove songs the user has already liked.
//!
//! Every recommendation list is drawn from the songs that survive this
//! filter, so it always runs first.

use crate::traits::{FilterContext, SongFilter};
use catalog::Song;

/// Removes songs whose id is in the user's like history.
pub struct AlreadyLikedFilter;

impl SongFilter for AlreadyLikedFilter {
    fn name(&self) -> &str {
        "AlreadyLikedFilter"
    }

    fn apply<'s>(&self, songs: Vec<&'s Song>, context: &FilterContext<'_>) -> Vec<&'s Song> {
        if context.liked_count() == 0 {
            return songs;
        }
        songs
            .into_iter()
            .filter(|song| !context.is_liked(&song.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Genre;

    #[test]
    fn test_already_liked_filter() {
        let songs = vec![
            Song::new("a", "A", Genre::Pop, 4),
            Song::new("b", "B", Genre::Pop, 3),
            Song::new("c", "C", Genre::Rock, 2),
            Song::new("d", "D", Genre::Rock, 1),
        ];
        let context = FilterContext::new(["a", "c", "not-in-catalog"]);

        let filtered = AlreadyLikedFilter.apply(songs.iter().collect(), &context);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "b");
        assert_eq!(filtered[1].id, "d");
    }

    #[test]
    fn test_no_likes_keeps_everything() {
        let songs = vec![Song::new("a", "A", Genre::Pop, 4)];
        let filtered = AlreadyLikedFilter.apply(songs.iter().collect(), &FilterContext::default());
        assert_eq!(filtered.len(), 1);
    }
}
