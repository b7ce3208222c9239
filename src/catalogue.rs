//! Loading the episode catalogue.
//!
//! The bundled dataset is compiled into the binary. A file with the same
//! `{ "serie": [...] }` schema can be loaded instead.

use crate::error::{AppError, Result};
use crate::types::{Dataset, Episode};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The dataset shipped with the application.
pub const BUNDLED_DATASET: &str = include_str!("../data/episodes.json");

/// Parse a dataset document into the ordered episode list.
///
/// Fails when the document does not parse or contains no episodes.
/// Duplicate episode numbers are reported but kept.
pub fn parse(json: &str) -> Result<Vec<Episode>> {
    let dataset: Dataset = serde_json::from_str(json)?;
    let episodes = dataset.serie;

    if episodes.is_empty() {
        return Err(AppError::Catalogue("dataset contains no episodes".to_string()));
    }

    let mut seen = HashSet::new();
    for episode in &episodes {
        if !seen.insert(episode.number) {
            warn!(
                "Duplicate episode number {} ('{}'); favorite/listened flags will be shared",
                episode.number, episode.title
            );
        }
    }

    debug!("Parsed {} episodes", episodes.len());
    Ok(episodes)
}

/// Load the bundled dataset.
pub fn load_bundled() -> Result<Vec<Episode>> {
    parse(BUNDLED_DATASET)
}

/// Load a dataset file from disk.
pub fn load_file(path: &Path) -> Result<Vec<Episode>> {
    info!("Loading episodes from {}", path.display());
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// Load from `path` when given, otherwise the bundled dataset.
pub fn load(path: Option<&Path>) -> Result<Vec<Episode>> {
    match path {
        Some(p) => load_file(p),
        None => load_bundled(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_parses() {
        let episodes = load_bundled().unwrap();
        assert!(!episodes.is_empty());
        let mut numbers: Vec<u32> = episodes.iter().map(|e| e.number).collect();
        let len = numbers.len();
        numbers.sort_unstable();
        numbers.dedup();
        assert_eq!(numbers.len(), len, "bundled numbers must be unique");
    }

    #[test]
    fn test_parse_keeps_source_order() {
        let json = r#"{ "serie": [
            { "nummer": 5, "titel": "e" },
            { "nummer": 1, "titel": "a" }
        ] }"#;
        let episodes = parse(json).unwrap();
        assert_eq!(episodes[0].number, 5);
        assert_eq!(episodes[1].number, 1);
    }

    #[test]
    fn test_parse_empty_serie_is_error() {
        let err = parse(r#"{ "serie": [] }"#).unwrap_err();
        assert!(matches!(err, AppError::Catalogue(_)));
    }

    #[test]
    fn test_parse_malformed_is_parse_error() {
        let err = parse(r#"{ "folgen": [] }"#).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load(Some(Path::new("/nonexistent/geheimzentrale/episodes.json"))).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
