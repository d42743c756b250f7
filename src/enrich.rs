//! Per-article enrichment: body and discussion fetch plus LLM summaries.
//!
//! Enrichment is strictly best-effort. Any failure along the way (body
//! fetch, comment fetch, text extraction, API call) leaves the corresponding
//! summary field empty and logs a warning; it never aborts the run. The
//! merge/trim/persist path downstream only ever sees a complete [`Article`],
//! summaries or not.

use crate::api::{ChatClient, ask_with_backoff};
use crate::models::Article;
use crate::settings::Settings;
use crate::utils::truncate_for_log;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Upper bound on text handed to the summarizer, in bytes.
const MAX_PROMPT_LEN: usize = 12_000;

/// Comments taken from the top of the thread page.
const MAX_COMMENTS: usize = 40;

const ARTICLE_PROMPT: &str = "You summarize news articles. Respond with a single \
plain-text paragraph of three to four sentences covering what happened, who is \
involved, and why it matters. No headers, no bullet points.";

const COMMENT_PROMPT: &str = "You summarize online discussion threads. Respond with \
a single plain-text paragraph of three to four sentences capturing the main points \
of view and any notable disagreement. No headers, no bullet points.";

/// Summarizes articles and their discussion threads.
pub struct Enricher {
    http: reqwest::Client,
    article_client: ChatClient,
    comment_client: ChatClient,
}

impl Enricher {
    pub fn new(http: reqwest::Client, settings: &Settings) -> Self {
        let article_client = ChatClient::from_settings(http.clone(), settings, ARTICLE_PROMPT);
        let comment_client = ChatClient::from_settings(http.clone(), settings, COMMENT_PROMPT);
        Self {
            http,
            article_client,
            comment_client,
        }
    }

    /// Fill in both summary fields of `article`, leaving either empty on
    /// failure.
    #[instrument(level = "info", skip_all, fields(article_id = %article.article_id))]
    pub async fn enrich(&self, article: &mut Article) {
        match self.summarize_article_body(&article.article_link).await {
            Ok(summary) => article.generated_article_summary = summary,
            Err(e) => {
                warn!(url = %article.article_link, error = %e, "Article summary failed; leaving empty");
            }
        }

        match self.summarize_comments(&article.comment_link).await {
            Ok(summary) => article.generated_comment_summary = summary,
            Err(e) => {
                warn!(url = %article.comment_link, error = %e, "Comment summary failed; leaving empty");
            }
        }

        info!(
            article_summary_len = article.generated_article_summary.len(),
            comment_summary_len = article.generated_comment_summary.len(),
            "Enrichment finished"
        );
    }

    async fn summarize_article_body(&self, url: &str) -> Result<String, Box<dyn Error>> {
        // TODO: for Ask/Show HN self posts the article link is the thread
        // itself; summarize the OP text instead of the page shell.
        let html = self.fetch_html(url).await?;
        let text = extract_paragraph_text(&html);
        if text.is_empty() {
            return Err("no paragraph text extracted".into());
        }
        debug!(bytes = text.len(), preview = %truncate_for_log(&text, 120), "Extracted article body");
        ask_with_backoff(&self.article_client, &clamp(&text)).await
    }

    async fn summarize_comments(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let html = self.fetch_html(url).await?;
        let text = extract_comment_text(&html);
        if text.is_empty() {
            return Err("no comments extracted".into());
        }
        debug!(bytes = text.len(), preview = %truncate_for_log(&text, 120), "Extracted comment thread");
        ask_with_backoff(&self.comment_client, &clamp(&text)).await
    }

    async fn fetch_html(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Pull readable text out of an article page: paragraph contents, in order.
fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("p").unwrap();

    let mut content = String::new();
    for element in document.select(&paragraph_selector) {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.trim();
        if !text.is_empty() {
            content.push_str(text);
            content.push('\n');
        }
    }
    content.trim_end().to_string()
}

/// Pull the top comments off a thread page, blank-line separated.
fn extract_comment_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let comment_selector = Selector::parse(".commtext").unwrap();

    let mut content = String::new();
    for element in document.select(&comment_selector).take(MAX_COMMENTS) {
        let text = element.text().collect::<Vec<_>>().join(" ");
        let text = text.trim();
        if !text.is_empty() {
            content.push_str(text);
            content.push_str("\n\n");
        }
    }
    content.trim_end().to_string()
}

/// Cap prompt input, cutting on a char boundary.
fn clamp(text: &str) -> String {
    if text.len() <= MAX_PROMPT_LEN {
        return text.to_string();
    }
    let mut cut = MAX_PROMPT_LEN;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text[..cut].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_paragraph_text_joins_paragraphs_in_order() {
        let html = r#"<html><body>
            <nav>Skip this</nav>
            <p>First paragraph.</p>
            <p>  Second paragraph.  </p>
            <p></p>
        </body></html>"#;

        assert_eq!(
            extract_paragraph_text(html),
            "First paragraph.\nSecond paragraph."
        );
    }

    #[test]
    fn test_extract_paragraph_text_empty_page() {
        assert_eq!(extract_paragraph_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_extract_comment_text_caps_comment_count() {
        let comments: String = (0..50)
            .map(|i| format!(r#"<div class="commtext">Comment {i}</div>"#))
            .collect();
        let html = format!("<html><body>{comments}</body></html>");

        let text = extract_comment_text(&html);
        assert!(text.contains("Comment 0"));
        assert!(text.contains("Comment 39"));
        assert!(!text.contains("Comment 40"));
    }

    #[test]
    fn test_clamp_cuts_on_char_boundary() {
        let text = "é".repeat(MAX_PROMPT_LEN); // 2 bytes per char
        let clamped = clamp(&text);
        assert!(clamped.len() <= MAX_PROMPT_LEN);
        assert!(clamped.chars().all(|c| c == 'é'));
    }
}
