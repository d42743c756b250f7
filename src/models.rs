//! Data model for the article collection.
//!
//! The whole pipeline revolves around one type: [`Article`], the unit of the
//! persisted collection. An `Article` is built from a single front-page
//! listing row and optionally enriched with LLM-generated summaries of the
//! story body and its discussion thread.
//!
//! The collection itself is a plain `Vec<Article>` ordered oldest-first;
//! [`crate::collection`] owns the merge and trim rules that keep it coherent
//! across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One Hacker News story as scraped from a front-page listing row.
///
/// All fields are set at parse time except the two summary fields, which stay
/// empty until enrichment runs (and stay empty forever if enrichment fails —
/// a failed summary must never poison the merge/trim/persist path).
///
/// `article_id` is the dedupe key: within the collection it is unique, a
/// property enforced by [`crate::collection::merge`] rather than by a set
/// type, because the merge must also decide which copy wins (the new one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Position on the listing page at fetch time. Not stable across fetches.
    pub rank: u32,
    /// Story headline.
    pub title: String,
    /// Link target of the headline; external URL or a relative self-post link.
    pub article_link: String,
    /// Discussion thread URL, derived from `article_id`.
    pub comment_link: String,
    /// Source item id; unique per story and the dedupe key for the collection.
    pub article_id: String,
    /// Vote count at fetch time.
    pub score: u32,
    /// Submitter's handle.
    pub user: String,
    /// Submission timestamp, `YYYY-MM-DDTHH:MM:SS`.
    pub datestring: String,
    /// LLM summary of the story body; empty until enrichment runs.
    #[serde(default)]
    pub generated_article_summary: String,
    /// LLM summary of the discussion thread; empty until enrichment runs.
    #[serde(default)]
    pub generated_comment_summary: String,
}

impl Article {
    /// Build the discussion thread URL for an item id.
    pub fn comment_link_for(site_base_url: &str, article_id: &str) -> String {
        format!(
            "{}/item?id={}",
            site_base_url.trim_end_matches('/'),
            article_id
        )
    }
}

/// The compact one-line form used by `output.txt` and console progress.
impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} ({}) [{} points by {}]",
            self.rank, self.title, self.article_link, self.score, self.user
        )
    }
}

#[cfg(test)]
pub(crate) fn test_article(article_id: &str, score: u32) -> Article {
    Article {
        rank: 1,
        title: format!("Story {article_id}"),
        article_link: format!("https://example.com/{article_id}"),
        comment_link: Article::comment_link_for("https://news.ycombinator.com", article_id),
        article_id: article_id.to_string(),
        score,
        user: "pg".to_string(),
        datestring: "2024-01-15T08:30:00".to_string(),
        generated_article_summary: String::new(),
        generated_comment_summary: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_link_derivation() {
        assert_eq!(
            Article::comment_link_for("https://news.ycombinator.com", "39281932"),
            "https://news.ycombinator.com/item?id=39281932"
        );
        // trailing slash on the base must not double up
        assert_eq!(
            Article::comment_link_for("https://news.ycombinator.com/", "1"),
            "https://news.ycombinator.com/item?id=1"
        );
    }

    #[test]
    fn test_display_one_line_form() {
        let article = Article {
            rank: 3,
            title: "Rust 2.0 announced".to_string(),
            article_link: "https://example.com/rust".to_string(),
            comment_link: "https://news.ycombinator.com/item?id=42".to_string(),
            article_id: "42".to_string(),
            score: 512,
            user: "steveklabnik".to_string(),
            datestring: "2024-01-15T08:30:00".to_string(),
            generated_article_summary: String::new(),
            generated_comment_summary: String::new(),
        };

        assert_eq!(
            article.to_string(),
            "3. Rust 2.0 announced (https://example.com/rust) [512 points by steveklabnik]"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let mut article = test_article("1000", 77);
        article.generated_article_summary = "A summary.".to_string();

        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_summary_fields_default_when_absent() {
        // Records persisted before enrichment ran must still deserialize.
        let json = r#"{
            "rank": 1,
            "title": "Old record",
            "article_link": "https://example.com/old",
            "comment_link": "https://news.ycombinator.com/item?id=7",
            "article_id": "7",
            "score": 10,
            "user": "dang",
            "datestring": "2024-01-15T08:30:00"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.generated_article_summary, "");
        assert_eq!(article.generated_comment_summary, "");
    }
}
