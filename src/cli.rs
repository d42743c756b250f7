//! Command-line interface definitions.
//!
//! Most behavior lives in `settings.json`; the CLI only selects the settings
//! file and offers per-run overrides for the date and the two expensive
//! toggles (fetching and summarization).

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the digest pipeline.
///
/// # Examples
///
/// ```sh
/// # Normal nightly run
/// hn_text_feed
///
/// # Backfill a specific front page
/// hn_text_feed --date 2024-01-15
///
/// # Re-render the feed and text logs from persisted state only
/// hn_text_feed --no-fetch
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the settings file
    #[arg(short, long, env = "HN_TEXT_FEED_SETTINGS", default_value = "settings.json")]
    pub settings: PathBuf,

    /// Target listing date (YYYY-MM-DD); overrides `override_date` in settings
    #[arg(short, long)]
    pub date: Option<String>,

    /// Skip fetching new articles; re-render outputs from persisted state
    #[arg(long)]
    pub no_fetch: bool,

    /// Collect articles without generating LLM summaries
    #[arg(long)]
    pub no_summaries: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["hn_text_feed"]);
        assert_eq!(cli.settings, PathBuf::from("settings.json"));
        assert_eq!(cli.date, None);
        assert!(!cli.no_fetch);
        assert!(!cli.no_summaries);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "hn_text_feed",
            "--settings",
            "/etc/hn/settings.json",
            "--date",
            "2024-01-15",
            "--no-fetch",
            "--no-summaries",
        ]);

        assert_eq!(cli.settings, PathBuf::from("/etc/hn/settings.json"));
        assert_eq!(cli.date.as_deref(), Some("2024-01-15"));
        assert!(cli.no_fetch);
        assert!(cli.no_summaries);
    }
}
