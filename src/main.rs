//! # HN Text Feed
//!
//! A news digest pipeline that scrapes the Hacker News front page for a
//! given date, optionally summarizes each story and its discussion thread
//! through an OpenAI-compatible LLM API, folds the results into a persisted
//! rolling collection, and republishes that collection as an RSS feed and
//! plain-text logs.
//!
//! ## Usage
//!
//! ```sh
//! hn_text_feed --settings settings.json
//! hn_text_feed --date 2024-01-15          # backfill a specific front page
//! hn_text_feed --no-fetch                 # re-render outputs only
//! ```
//!
//! ## Architecture
//!
//! One sequential pass per run:
//! 1. **Load**: read settings and the persisted collection
//! 2. **Fetch**: scrape the dated front page listing (sequentially enriched
//!    with LLM summaries when enabled)
//! 3. **Merge**: dedupe new records into the collection by item id, new copy
//!    winning and moving to the end
//! 4. **Trim**: evict oldest entries past the configured cap
//! 5. **Publish**: persist the collection, rewrite the text logs and the
//!    RSS feed

use clap::Parser;
use std::error::Error;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod collection;
mod enrich;
mod error;
mod models;
mod outputs;
mod scrapers;
mod settings;
mod store;
mod utils;

use cli::Cli;
use enrich::Enricher;
use outputs::{rss, text};
use settings::Settings;
use utils::{ensure_writable_dir, resolve_date};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hn_text_feed starting up");

    // Parse CLI and fold its overrides into the settings object.
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut settings = Settings::load(&args.settings)?;
    if let Some(date) = args.date {
        settings.override_date = Some(date);
    }
    if args.no_fetch {
        settings.load_new_articles = false;
    }
    if args.no_summaries {
        settings.generate_summaries = false;
    }

    let date = resolve_date(&settings);
    info!(%date, "Resolved target date");

    // Early check: outputs must be writable before any network work.
    ensure_writable_dir(&settings.logging_folder).await?;

    // Load the persisted collection; a missing file is a supported first run.
    let mut articles = store::load(&settings.collection_file)?;

    if settings.load_new_articles {
        let http = reqwest::Client::builder()
            .user_agent(concat!("hn_text_feed/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        let mut new_articles = scrapers::hackernews::fetch_front_page(&http, &settings, &date).await?;

        if settings.generate_summaries {
            let enricher = Enricher::new(http, &settings);
            // Strictly one fetch at a time; enrichment failures degrade to
            // empty summaries and never abort the run.
            for article in &mut new_articles {
                enricher.enrich(article).await;
            }
        }

        collection::merge(&mut articles, new_articles);
    } else {
        info!("Skipping fetch; re-rendering outputs from persisted state");
    }

    // Trim after merge so refetched records are already at the end and
    // protected from eviction.
    collection::trim(&mut articles, settings.max_items_to_keep);

    store::save(&settings.collection_file, &articles)?;

    text::write_text_logs(&settings, &articles).await?;
    rss::write_feed(&settings, &articles).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        articles = articles.len(),
        "Execution complete"
    );

    Ok(())
}
