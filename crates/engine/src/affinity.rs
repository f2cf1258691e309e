//! Genre affinity table.
//!
//! Maps each genre to a short ordered list of "related" genres. Only
//! consulted for discovery once a user has explored every genre.

use catalog::Genre;
use std::collections::HashMap;

/// Static relation between genres.
///
/// Not symmetric: Pop lists K_Pop, but K_Pop lists Pop and Electronica.
/// A genre with no entry simply has no related genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreAffinity {
    related: HashMap<Genre, Vec<Genre>>,
}

impl GenreAffinity {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            related: HashMap::new(),
        }
    }

    /// Build a table from (genre, related genres) pairs. Later pairs win.
    pub fn from_pairs<I, R>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Genre, R)>,
        R: IntoIterator<Item = Genre>,
    {
        let related = pairs
            .into_iter()
            .map(|(genre, related)| (genre, related.into_iter().collect()))
            .collect();
        Self { related }
    }

    /// Replace the related genres of one genre (builder pattern)
    pub fn with_related(mut self, genre: Genre, related: impl IntoIterator<Item = Genre>) -> Self {
        self.related.insert(genre, related.into_iter().collect());
        self
    }

    /// Related genres of `genre`, in table order
    pub fn related(&self, genre: Genre) -> &[Genre] {
        self.related
            .get(&genre)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

impl Default for GenreAffinity {
    fn default() -> Self {
        use Genre::*;

        Self::from_pairs([
            (Pop, [KPop, Indie]),
            (Rock, [Metal, Indie]),
            (Electronica, [Pop, Indie]),
            (Jazz, [Blues, Salsa]),
            (HipHop, [Reggaeton, Pop]),
            (Metal, [Rock, HipHop]),
            (Reggaeton, [Salsa, HipHop]),
            (Salsa, [Reggaeton, Jazz]),
            (Country, [Blues, Rock]),
            (Blues, [Jazz, Country]),
            (KPop, [Pop, Electronica]),
            (Indie, [Rock, Electronica]),
        ])
    }
}
