//! Hacker News front-page scraper.
//!
//! The front page for a date is served at `/front?day=YYYY-MM-DD`. Each story
//! is a `tr.athing` row holding the rank, headline, link and item id; the
//! immediately following row carries the subtext (score, submitter, age).
//!
//! # Row recovery
//!
//! A row missing an expected element (job postings have no score or
//! submitter) is skipped with a warning naming the row and the missing field;
//! the rest of the page is still processed. Only the listing fetch itself is
//! fatal.

use crate::error::PipelineError;
use crate::models::Article;
use crate::settings::Settings;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument, warn};
use url::Url;

/// Fetch the front page for `date` and parse it into article records.
///
/// The listing URL is `settings.articles_url` with the date appended. Any
/// HTTP failure aborts the run via [`PipelineError::FetchFailed`].
#[instrument(level = "info", skip(client, settings))]
pub async fn fetch_front_page(
    client: &reqwest::Client,
    settings: &Settings,
    date: &str,
) -> Result<Vec<Article>, PipelineError> {
    let url = format!("{}{}", settings.articles_url, date);
    let fetch_err = |source| PipelineError::FetchFailed {
        url: url.clone(),
        source,
    };

    let response = client.get(&url).send().await.map_err(fetch_err)?;
    let response = response.error_for_status().map_err(fetch_err)?;
    let html = response.text().await.map_err(fetch_err)?;

    let document = Html::parse_document(&html);
    let articles = parse_listing(&document, settings);
    info!(count = articles.len(), %url, "Fetched front page listing");
    Ok(articles)
}

/// Parse every listing row in document order, capped at
/// `settings.max_articles`.
pub fn parse_listing(document: &Html, settings: &Settings) -> Vec<Article> {
    let row_selector = Selector::parse("tr.athing").unwrap();

    let mut articles = Vec::new();
    for row in document.select(&row_selector) {
        if articles.len() >= settings.max_articles {
            break;
        }
        let row_id = row.attr("id").unwrap_or("<missing id>").to_string();
        match parse_row(row, settings) {
            Ok(article) => {
                // Progress line, one per accepted row.
                info!(article = %article, "Parsed listing row");
                articles.push(article);
            }
            Err(missing) => {
                warn!(row_id = %row_id, missing, "Skipping malformed listing row");
            }
        }
    }
    articles
}

/// Parse one `tr.athing` row plus its subtext sibling into an [`Article`].
///
/// Returns the name of the first missing piece on failure, so the caller can
/// log a precise skip reason.
fn parse_row(row: ElementRef<'_>, settings: &Settings) -> Result<Article, &'static str> {
    let rank_selector = Selector::parse("span.rank").unwrap();
    let title_selector = Selector::parse("span.titleline > a").unwrap();
    let score_selector = Selector::parse("span.score").unwrap();
    let user_selector = Selector::parse("a.hnuser").unwrap();
    let age_selector = Selector::parse("span.age").unwrap();

    let article_id = row.attr("id").ok_or("row id")?.to_string();

    let rank_text = element_text(row.select(&rank_selector).next().ok_or("span.rank")?);
    let rank = rank_text
        .trim_end_matches('.')
        .parse::<u32>()
        .map_err(|_| "numeric rank")?;

    let title_anchor = row.select(&title_selector).next().ok_or("titleline link")?;
    let title = element_text(title_anchor);
    if title.is_empty() {
        return Err("non-empty title");
    }
    let href = title_anchor.attr("href").ok_or("titleline href")?;
    let article_link = absolutize(href, &settings.site_base_url);

    // Score, submitter and age live in the next table row.
    let subtext = row
        .next_siblings()
        .find_map(ElementRef::wrap)
        .ok_or("subtext row")?;

    let score_text = element_text(subtext.select(&score_selector).next().ok_or("span.score")?);
    let score = score_text
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<u32>().ok())
        .ok_or("numeric score")?;

    let user = element_text(subtext.select(&user_selector).next().ok_or("a.hnuser")?);

    // The age title attribute is "<ISO timestamp> <unix epoch>".
    let age_title = subtext
        .select(&age_selector)
        .next()
        .and_then(|age| age.attr("title"))
        .ok_or("span.age title")?;
    let datestring = age_title
        .split_whitespace()
        .next()
        .ok_or("age timestamp")?
        .to_string();

    Ok(Article {
        rank,
        title,
        article_link,
        comment_link: Article::comment_link_for(&settings.site_base_url, &article_id),
        article_id,
        score,
        user,
        datestring,
        generated_article_summary: String::new(),
        generated_comment_summary: String::new(),
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<Vec<_>>().join("").trim().to_string()
}

/// Resolve a possibly relative href (self posts link to `item?id=...`)
/// against the site base.
fn absolutize(href: &str, site_base_url: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    match Url::parse(site_base_url).and_then(|base| base.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}
