//! Runtime settings, loaded once from `settings.json` at startup.
//!
//! The settings object is constructed in `main` and passed by reference into
//! every component that needs it — there is no ambient global configuration.

use crate::error::PipelineError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything the pipeline reads from `settings.json`.
///
/// Most fields have serde defaults so a minimal settings file only needs the
/// toggles the operator actually cares about.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Base listing URL; the target date is appended verbatim.
    #[serde(default = "default_articles_url")]
    pub articles_url: String,
    /// Site root, used for comment links and for resolving relative
    /// self-post links.
    #[serde(default = "default_site_base_url")]
    pub site_base_url: String,
    /// Cap on rows taken from one listing fetch.
    #[serde(default = "default_max_articles")]
    pub max_articles: usize,
    /// Cap on the persisted collection size; oldest entries are evicted.
    #[serde(default = "default_max_items_to_keep")]
    pub max_items_to_keep: usize,
    /// When false the run only re-renders outputs from persisted state.
    #[serde(default = "default_true")]
    pub load_new_articles: bool,
    /// When false, articles are collected without LLM summaries.
    #[serde(default = "default_true")]
    pub generate_summaries: bool,
    /// Explicit target date `YYYY-MM-DD`; empty or absent means yesterday.
    #[serde(default)]
    pub override_date: Option<String>,
    /// Directory receiving `output.txt`, `pretty.txt` and the feed document.
    #[serde(default = "default_logging_folder")]
    pub logging_folder: String,
    /// Path of the persisted collection file.
    #[serde(default = "default_collection_file")]
    pub collection_file: PathBuf,
    /// Feed filename, relative to `logging_folder`.
    #[serde(default = "default_feed_file")]
    pub feed_file: String,
    #[serde(default = "default_feed_title")]
    pub feed_title: String,
    #[serde(default = "default_feed_link")]
    pub feed_link: String,
    #[serde(default = "default_feed_description")]
    pub feed_description: String,
    /// OpenAI-compatible API root.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_articles_url() -> String {
    "https://news.ycombinator.com/front?day=".to_string()
}
fn default_site_base_url() -> String {
    "https://news.ycombinator.com".to_string()
}
fn default_max_articles() -> usize {
    30
}
fn default_max_items_to_keep() -> usize {
    100
}
fn default_true() -> bool {
    true
}
fn default_logging_folder() -> String {
    "./logs/".to_string()
}
fn default_collection_file() -> PathBuf {
    PathBuf::from("articles.json")
}
fn default_feed_file() -> String {
    "feed.xml".to_string()
}
fn default_feed_title() -> String {
    "Hacker News, summarized".to_string()
}
fn default_feed_link() -> String {
    "https://news.ycombinator.com/front".to_string()
}
fn default_feed_description() -> String {
    "Front-page stories with generated article and discussion summaries".to_string()
}
fn default_api_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

impl Settings {
    /// Read and parse the settings file. Any failure is fatal.
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| PipelineError::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let settings: Settings =
            serde_json::from_str(&raw).map_err(|e| PipelineError::Settings {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Full path of the feed document.
    pub fn feed_path(&self) -> PathBuf {
        Path::new(&self.logging_folder).join(&self.feed_file)
    }
}

#[cfg(test)]
impl Default for Settings {
    fn default() -> Self {
        serde_json::from_str("{}").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_settings_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_articles": 5 }}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.max_articles, 5);
        assert_eq!(settings.max_items_to_keep, 100);
        assert!(settings.load_new_articles);
        assert_eq!(settings.override_date, None);
        assert_eq!(settings.collection_file, PathBuf::from("articles.json"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_articels": 5 }}"#).unwrap();

        assert!(Settings::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = Settings::load(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(err.to_string().contains("settings"));
    }

    #[test]
    fn test_feed_path_joins_logging_folder() {
        let settings = Settings {
            logging_folder: "./logs/".to_string(),
            feed_file: "feed.xml".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.feed_path(), PathBuf::from("./logs/feed.xml"));
    }
}
