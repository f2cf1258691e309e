//! Merge ranked lists into the combined recommendation list.

use catalog::Song;
use std::collections::HashSet;

/// Concatenate lists in priority order, keeping the first occurrence of
/// each song id, then cap the result at `limit`
pub fn merge_dedup<'s>(lists: &[&[&'s Song]], limit: usize) -> Vec<&'s Song> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut combined = Vec::new();

    for list in lists {
        for &song in *list {
            if seen.insert(song.id.as_str()) {
                combined.push(song);
            }
        }
    }

    combined.truncate(limit);
    combined
}
