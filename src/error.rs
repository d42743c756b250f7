//! Fatal error kinds for the pipeline.
//!
//! Only conditions that must abort the run live here: the listing fetch, the
//! settings file, and the persisted collection store. Per-article enrichment
//! failures are deliberately *not* represented — they degrade to empty
//! summary fields instead of propagating.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The front-page listing could not be retrieved. There is no retry; the
    /// run aborts carrying the URL and the underlying cause.
    #[error("error fetching articles from {url}: {source}")]
    FetchFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The settings file was missing or malformed.
    #[error("failed to load settings from {path}: {reason}")]
    Settings { path: PathBuf, reason: String },

    /// The persisted collection could not be read.
    #[error("failed to load collection from {path}")]
    StoreLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted collection was present but not deserializable. Aborting
    /// here (rather than starting empty) keeps a corrupt read from being
    /// overwritten with a truncated collection at the end of the run.
    #[error("persisted collection at {path} is corrupt")]
    StoreCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be written. The previous persisted state is
    /// left untouched (writes go to a temp file first).
    #[error("failed to save collection to {path}")]
    StoreSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
