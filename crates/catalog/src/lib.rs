//! # Catalog Crate
//!
//! This crate owns the song catalog the recommender works over.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Song, Genre, Catalog)
//! - **parser**: Parse `::`-separated catalog files into songs
//! - **index**: Load, build and query a `Catalog`
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, GenrePolicy};
//! use std::path::Path;
//!
//! let catalog = Catalog::load_from_file(Path::new("data/songs.dat"), GenrePolicy::Skip)?;
//!
//! let song = catalog.get_song("s1").unwrap();
//! let rock: Vec<_> = catalog.songs_by_genre(catalog::Genre::Rock).collect();
//!
//! println!("{} has {} views; {} rock songs", song.title, song.views, rock.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use parser::GenrePolicy;
pub use types::{
    // Type aliases
    SongId,
    UserId,
    // Core types
    Song,
    Catalog,
    // Enums
    Genre,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_creation() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_insert_song() {
        let mut catalog = Catalog::new();
        catalog
            .insert_song(Song::new("s1", "Despacito", Genre::Reggaeton, 8000))
            .unwrap();

        let retrieved = catalog.get_song("s1").unwrap();
        assert_eq!(retrieved.title, "Despacito");
        assert_eq!(retrieved.genre, Genre::Reggaeton);
        assert!(catalog.contains("s1"));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut catalog = Catalog::new();
        catalog.insert_song(Song::new("s1", "A", Genre::Pop, 1)).unwrap();

        let result = catalog.insert_song(Song::new("s1", "B", Genre::Rock, 2));
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get_song("s1").unwrap().title, "A");
    }

    #[test]
    fn test_songs_by_genre_keeps_catalog_order() {
        let catalog = Catalog::from_songs(vec![
            Song::new("j1", "Take Five", Genre::Jazz, 10),
            Song::new("p1", "Toxic", Genre::Pop, 30),
            Song::new("j2", "So What", Genre::Jazz, 20),
        ])
        .unwrap();

        let jazz: Vec<&str> = catalog
            .songs_by_genre(Genre::Jazz)
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(jazz, vec!["j1", "j2"]);
        assert_eq!(catalog.songs_by_genre(Genre::Metal).count(), 0);

        let counts = catalog.genre_counts();
        assert_eq!(counts.len(), Genre::ALL.len());
        assert_eq!(counts[0], (Genre::Pop, 1));
        assert_eq!(counts[3], (Genre::Jazz, 2));
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();
        assert!(catalog.get_song("missing").is_none());
        assert!(!catalog.contains("missing"));
        assert_eq!(catalog.songs_by_genre(Genre::Pop).count(), 0);
    }

    #[test]
    fn test_genre_parsing() {
        assert_eq!("Hip_Hop".parse::<Genre>().unwrap(), Genre::HipHop);
        assert_eq!("hip hop".parse::<Genre>().unwrap(), Genre::HipHop);
        assert_eq!("K-Pop".parse::<Genre>().unwrap(), Genre::KPop);
        assert_eq!("electronica".parse::<Genre>().unwrap(), Genre::Electronica);
        assert!("Polka".parse::<Genre>().is_err());

        for genre in Genre::ALL {
            assert_eq!(genre.as_str().parse::<Genre>().unwrap(), genre);
            assert_eq!(genre.to_string(), genre.as_str());
        }
    }

    #[test]
    fn test_song_serializes_canonical_genre() {
        let song = Song::new("k1", "Dynamite", Genre::KPop, 42);
        let json = serde_json::to_string(&song).unwrap();
        assert!(json.contains("\"K_Pop\""));

        let back: Song = serde_json::from_str(&json).unwrap();
        assert_eq!(back, song);
    }
}
