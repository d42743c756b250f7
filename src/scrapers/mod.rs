//! Scrapers for the source site.
//!
//! One source, one module: [`hackernews`] fetches the rendered front page for
//! a given date and parses each listing row into an
//! [`crate::models::Article`].
//!
//! The scraper follows a two-phase pattern:
//!
//! 1. **Fetching**: retrieve the listing HTML (fatal on HTTP failure)
//! 2. **Parsing**: extract one record per row, in page order, capped at the
//!    configured maximum; malformed rows are logged and skipped

pub mod hackernews;
