//! Persistence for the article collection.
//!
//! The collection is stored as a JSON array, read once at startup and written
//! once at the end of the run. Saves go through a temp file in the target
//! directory followed by a rename, so a crash mid-save leaves the previous
//! successful save intact.
//!
//! A missing file is a supported first-run condition and yields an empty
//! collection; a file that exists but cannot be read or parsed is fatal, so a
//! bad read is never papered over and then clobbered at save time.

use crate::error::PipelineError;
use crate::models::Article;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Load the persisted collection, or an empty one on first run.
pub fn load(path: &Path) -> Result<Vec<Article>, PipelineError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "No persisted collection; starting empty");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(PipelineError::StoreLoad {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let collection: Vec<Article> =
        serde_json::from_str(&raw).map_err(|e| PipelineError::StoreCorrupt {
            path: path.to_path_buf(),
            source: e,
        })?;
    info!(path = %path.display(), count = collection.len(), "Loaded persisted collection");
    Ok(collection)
}

/// Persist the full collection, overwriting the previous state atomically.
pub fn save(path: &Path, collection: &[Article]) -> Result<(), PipelineError> {
    let save_err = |source| PipelineError::StoreSave {
        path: path.to_path_buf(),
        source,
    };

    let json = serde_json::to_string_pretty(collection)
        .map_err(|e| save_err(std::io::Error::other(e)))?;

    // Temp file in the same directory so the rename stays on one filesystem.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(save_err)?;
    std::fs::rename(&tmp_path, path).map_err(save_err)?;

    info!(path = %path.display(), count = collection.len(), "Persisted collection");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_article;

    #[test]
    fn test_missing_file_yields_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let collection = load(&dir.path().join("articles.json")).unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_save_load_round_trip_preserves_fields_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");

        let mut enriched = test_article("2", 40);
        enriched.generated_article_summary = "Body summary.".to_string();
        enriched.generated_comment_summary = "Thread summary.".to_string();
        let collection = vec![test_article("1", 12), enriched, test_article("3", 0)];

        save(&path, &collection).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, collection);
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");

        save(&path, &[test_article("1", 1), test_article("2", 2)]).unwrap();
        save(&path, &[test_article("2", 9)]).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].article_id, "2");
        assert_eq!(loaded[0].score, 9);
    }

    #[test]
    fn test_save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");

        save(&path, &[test_article("1", 1)]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        std::fs::write(&path, "not json").unwrap();

        match load(&path) {
            Err(PipelineError::StoreCorrupt { .. }) => {}
            other => panic!("expected StoreCorrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_array_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("articles.json");
        save(&path, &[]).unwrap();
        assert!(load(&path).unwrap().is_empty());
    }
}
