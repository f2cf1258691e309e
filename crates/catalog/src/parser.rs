//! Parser for catalog files.
//!
//! One song per line, fields separated by `::`:
//!
//! ```text
//! id::title::genre::views
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The title defaults to
//! "Untitled" and the view count to 0 when left empty.

use crate::error::{CatalogError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Title used when a line leaves the title empty
pub const UNTITLED: &str = "Untitled";

/// What to do with a line whose genre is not in the fixed genre set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenrePolicy {
    /// Drop the line with a warning and keep loading
    #[default]
    Skip,
    /// Fail the whole load with `ValidationError`
    Reject,
}

/// Read a whole file into lines, mapping a missing file to `NotFound`
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::NotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::Io(e),
    })?;

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse a catalog file into songs, in file order
///
/// Lines are parsed in parallel; collecting an indexed parallel iterator
/// keeps file order.
pub fn parse_songs(path: &Path, policy: GenrePolicy) -> Result<Vec<Song>> {
    let lines = read_lines(path)?;
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let parsed: Vec<Option<Song>> = lines
        .par_iter()
        .enumerate()
        .map(|(idx, line)| parse_song_line(&file, idx + 1, line, policy))
        .collect::<Result<Vec<Option<Song>>>>()?;

    Ok(parsed.into_iter().flatten().collect())
}

/// Parse a single catalog line
///
/// Returns `Ok(None)` for lines that carry no song (blank, comment, or a
/// skipped unknown genre).
pub fn parse_song_line(
    file: &str,
    line_no: usize,
    line: &str,
    policy: GenrePolicy,
) -> Result<Option<Song>> {
    let line_trimmed = line.trim();
    if line_trimmed.is_empty() || line_trimmed.starts_with('#') {
        return Ok(None);
    }

    let parse_error = |reason: String| CatalogError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason,
    };

    // Split by "::"
    let mut parts = line_trimmed.splitn(4, "::").map(str::trim);

    let id = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("Missing song id".to_string()))?;

    let title = match parts.next() {
        Some(t) if !t.is_empty() => t,
        _ => UNTITLED,
    };

    let genre_str = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| parse_error("Missing genre".to_string()))?;

    let genre = match genre_str.parse::<Genre>() {
        Ok(genre) => genre,
        Err(_) => match policy {
            GenrePolicy::Skip => {
                warn!(
                    "Skipping song {} at line {} in {}: unknown genre {}",
                    id, line_no, file, genre_str
                );
                return Ok(None);
            }
            GenrePolicy::Reject => {
                return Err(CatalogError::ValidationError(format!(
                    "unknown genre {} for song {} at line {} in {}",
                    genre_str, id, line_no, file
                )));
            }
        },
    };

    let views = match parts.next() {
        Some(v) if !v.is_empty() => v
            .parse::<u64>()
            .map_err(|e| parse_error(format!("Invalid views {:?}: {}", v, e)))?,
        _ => 0,
    };

    Ok(Some(Song::new(id, title, genre, views)))
}
