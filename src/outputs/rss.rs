//! RSS 2.0 feed writer.
//!
//! The feed is regenerated from the full trimmed collection on every run and
//! written to a fixed path, intended to be served by a plain static file
//! server. Items are emitted newest first: the collection is oldest-first
//! internally, so rendering walks it in reverse.

use crate::models::Article;
use crate::settings::Settings;
use chrono::NaiveDateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use std::io::Write as _;
use tokio::fs;
use tracing::{info, instrument};

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error>> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// Convert the stored `YYYY-MM-DDTHH:MM:SS` timestamp to the RFC 2822 form
/// RSS readers expect. A malformed datestring passes through raw.
fn format_pub_date(datestring: &str) -> String {
    match NaiveDateTime::parse_from_str(datestring, "%Y-%m-%dT%H:%M:%S") {
        Ok(date) => date.and_utc().to_rfc2822(),
        Err(_) => datestring.to_string(),
    }
}

fn item_description(article: &Article) -> String {
    if article.generated_article_summary.is_empty()
        && article.generated_comment_summary.is_empty()
    {
        return format!("{} points, submitted by {}", article.score, article.user);
    }

    let mut description = String::new();
    if !article.generated_article_summary.is_empty() {
        description.push_str("Article summary: ");
        description.push_str(&article.generated_article_summary);
    }
    if !article.generated_comment_summary.is_empty() {
        if !description.is_empty() {
            description.push_str("\n\n");
        }
        description.push_str("Discussion summary: ");
        description.push_str(&article.generated_comment_summary);
    }
    description
}

/// Render the collection as an RSS 2.0 document, newest item first.
pub fn render_feed(settings: &Settings, collection: &[Article]) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss_start))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;
    write_text_element(&mut writer, "title", &settings.feed_title)?;
    write_text_element(&mut writer, "link", &settings.feed_link)?;
    write_text_element(&mut writer, "description", &settings.feed_description)?;

    for article in collection.iter().rev() {
        writer.write_event(Event::Start(BytesStart::new("item")))?;
        write_text_element(&mut writer, "title", &article.title)?;
        write_text_element(&mut writer, "link", &article.article_link)?;
        write_text_element(&mut writer, "comments", &article.comment_link)?;
        write_text_element(&mut writer, "author", &article.user)?;
        write_text_element(&mut writer, "pubDate", &format_pub_date(&article.datestring))?;
        write_text_element(&mut writer, "description", &item_description(article))?;

        let mut guid = BytesStart::new("guid");
        guid.push_attribute(("isPermaLink", "true"));
        writer.write_event(Event::Start(guid))?;
        writer.write_event(Event::Text(BytesText::new(&article.comment_link)))?;
        writer.write_event(Event::End(BytesEnd::new("guid")))?;

        writer.write_event(Event::End(BytesEnd::new("item")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    let mut out = writer.into_inner();
    out.write_all(b"\n")?;
    Ok(out)
}

/// Render and write the feed document, replacing the previous one atomically.
#[instrument(level = "info", skip_all)]
pub async fn write_feed(settings: &Settings, collection: &[Article]) -> Result<(), Box<dyn Error>> {
    let feed = render_feed(settings, collection)?;
    let path = settings.feed_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp_path = path.with_extension("xml.tmp");
    fs::write(&tmp_path, &feed).await?;
    fs::rename(&tmp_path, &path).await?;

    info!(path = %path.display(), items = collection.len(), bytes = feed.len(), "Wrote RSS feed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_article;

    fn feed_string(collection: &[Article]) -> String {
        let settings = Settings::default();
        String::from_utf8(render_feed(&settings, collection).unwrap()).unwrap()
    }

    #[test]
    fn test_feed_has_channel_metadata() {
        let out = feed_string(&[]);
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(out.contains(r#"<rss version="2.0">"#));
        assert!(out.contains("<title>Hacker News, summarized</title>"));
        assert!(out.contains("<link>https://news.ycombinator.com/front</link>"));
        assert!(!out.contains("<item>"));
    }

    #[test]
    fn test_feed_items_newest_first() {
        // Collection is oldest-first; the reader-facing feed is reversed.
        let out = feed_string(&[test_article("1", 1), test_article("2", 2)]);

        let newest = out.find("Story 2").unwrap();
        let oldest = out.find("Story 1").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_feed_escapes_reserved_characters() {
        let mut article = test_article("1", 1);
        article.title = "Cats & <dogs>".to_string();
        let out = feed_string(&[article]);

        assert!(out.contains("Cats &amp; &lt;dogs&gt;"));
        assert!(!out.contains("Cats & <dogs>"));
    }

    #[test]
    fn test_feed_pub_date_is_rfc2822() {
        let out = feed_string(&[test_article("1", 1)]);
        assert!(out.contains("<pubDate>Mon, 15 Jan 2024 08:30:00 +0000</pubDate>"));
    }

    #[test]
    fn test_feed_guid_is_comment_link() {
        let out = feed_string(&[test_article("77", 1)]);
        assert!(out.contains(
            r#"<guid isPermaLink="true">https://news.ycombinator.com/item?id=77</guid>"#
        ));
    }

    #[test]
    fn test_item_description_prefers_summaries() {
        let mut article = test_article("1", 42);
        assert_eq!(item_description(&article), "42 points, submitted by pg");

        article.generated_article_summary = "What happened.".to_string();
        article.generated_comment_summary = "What people said.".to_string();
        assert_eq!(
            item_description(&article),
            "Article summary: What happened.\n\nDiscussion summary: What people said."
        );
    }

    #[tokio::test]
    async fn test_write_feed_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings {
            logging_folder: dir.path().to_string_lossy().to_string(),
            ..Settings::default()
        };

        write_feed(&settings, &[test_article("1", 1)]).await.unwrap();

        let path = dir.path().join("feed.xml");
        assert!(path.exists());
        assert!(!dir.path().join("feed.xml.tmp").exists());
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("<item>"));
    }
}
