//! Error types for the catalog crate.
//!
//! Loading a catalog can fail in a small number of well-defined ways:
//! - The file is missing
//! - A line could not be parsed
//! - The parsed data violates a catalog invariant (unknown genre in strict
//!   mode, duplicate song ids)

use thiserror::Error;

/// Errors that can occur while loading or building a catalog
///
/// The `#[derive(Error)]` macro from thiserror implements `std::error::Error`
/// and `Display` from the `#[error(...)]` attributes.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file does not exist
    #[error("Catalog file not found: {path}")]
    NotFound { path: String },

    /// I/O error occurred while reading the file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line in the catalog file couldn't be parsed
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A field had a value outside its domain
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Catalog-level validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
