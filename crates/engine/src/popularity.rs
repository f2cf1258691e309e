//! Popularity ordering helpers.
//!
//! Every ranked list in the engine is "views, highest first". Ties keep
//! catalog order, which `sort_by` guarantees since it is stable.

use catalog::{Genre, Song};

/// Sort songs by views, highest first, ties in their current order
pub fn sort_by_views(songs: &mut [&Song]) {
    songs.sort_by(|a, b| b.views.cmp(&a.views));
}

/// The `limit` most viewed songs
pub fn top_by_views<'s>(songs: &[&'s Song], limit: usize) -> Vec<&'s Song> {
    let mut ranked = songs.to_vec();
    sort_by_views(&mut ranked);
    ranked.truncate(limit);
    ranked
}

/// The `limit` most viewed songs of one genre
pub fn top_of_genre<'s>(songs: &[&'s Song], genre: Genre, limit: usize) -> Vec<&'s Song> {
    let mut ranked: Vec<&Song> = songs
        .iter()
        .copied()
        .filter(|song| song.genre == genre)
        .collect();
    sort_by_views(&mut ranked);
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(songs: &[&Song]) -> Vec<String> {
        songs.iter().map(|s| s.id.clone()).collect()
    }

    #[test]
    fn test_top_by_views_stable_ties() {
        let songs = vec![
            Song::new("a", "A", Genre::Pop, 5),
            Song::new("b", "B", Genre::Rock, 9),
            Song::new("c", "C", Genre::Pop, 5),
            Song::new("d", "D", Genre::Jazz, 1),
        ];
        let refs: Vec<&Song> = songs.iter().collect();

        assert_eq!(ids(&top_by_views(&refs, 10)), vec!["b", "a", "c", "d"]);
        assert_eq!(ids(&top_by_views(&refs, 2)), vec!["b", "a"]);
        assert!(top_by_views(&refs, 0).is_empty());
    }

    #[test]
    fn test_top_of_genre() {
        let songs = vec![
            Song::new("p1", "P1", Genre::Pop, 1),
            Song::new("r1", "R1", Genre::Rock, 100),
            Song::new("p2", "P2", Genre::Pop, 3),
            Song::new("p3", "P3", Genre::Pop, 3),
        ];
        let refs: Vec<&Song> = songs.iter().collect();

        assert_eq!(ids(&top_of_genre(&refs, Genre::Pop, 2)), vec!["p2", "p3"]);
        assert_eq!(ids(&top_of_genre(&refs, Genre::Pop, 1)), vec!["p2"]);
        assert!(top_of_genre(&refs, Genre::Metal, 2).is_empty());
    }
}
