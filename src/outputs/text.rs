//! Plain-text log outputs.
//!
//! Two files are rewritten from the full collection on every run:
//!
//! - `output.txt`: the compact one-line form of each article
//! - `pretty.txt`: a labeled block per article, blank-line separated

use crate::models::Article;
use crate::settings::Settings;
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Render the one-line-per-article dump.
pub fn render_plain(collection: &[Article]) -> String {
    let mut out = String::new();
    for article in collection {
        writeln!(out, "{article}").unwrap();
    }
    out
}

/// Render the verbose labeled dump.
pub fn render_pretty(collection: &[Article]) -> String {
    let mut out = String::new();
    for article in collection {
        writeln!(out, "Title: {}", article.title).unwrap();
        writeln!(out, "Article Link: {}", article.article_link).unwrap();
        writeln!(out, "Comment Link: {}", article.comment_link).unwrap();
        writeln!(out, "Score: {}", article.score).unwrap();
        writeln!(out, "User: {}", article.user).unwrap();
        writeln!(out, "Date: {}", format_date(&article.datestring)).unwrap();
        writeln!(
            out,
            "Generated Article Summary: {}",
            article.generated_article_summary
        )
        .unwrap();
        writeln!(
            out,
            "Generated Comment Summary: {}",
            article.generated_comment_summary
        )
        .unwrap();
        out.push_str("\n\n");
    }
    out
}

/// Reformat the submission timestamp for reading; a malformed datestring is
/// rendered raw.
fn format_date(datestring: &str) -> String {
    match NaiveDateTime::parse_from_str(datestring, "%Y-%m-%dT%H:%M:%S") {
        Ok(date) => date.format("%m/%d/%Y %I:%M:%S %p").to_string(),
        Err(_) => datestring.to_string(),
    }
}

/// Write both text logs into the logging folder.
#[instrument(level = "info", skip_all, fields(folder = %settings.logging_folder))]
pub async fn write_text_logs(
    settings: &Settings,
    collection: &[Article],
) -> Result<(), Box<dyn Error>> {
    let folder = Path::new(&settings.logging_folder);
    fs::create_dir_all(folder).await?;

    let output_path = folder.join("output.txt");
    fs::write(&output_path, render_plain(collection)).await?;
    info!(path = %output_path.display(), "Wrote plain text log");

    let pretty_path = folder.join("pretty.txt");
    fs::write(&pretty_path, render_pretty(collection)).await?;
    info!(path = %pretty_path.display(), "Wrote pretty text log");

    Ok(())
}
