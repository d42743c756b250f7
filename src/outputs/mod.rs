//! Output generation for the text logs and the syndication feed.
//!
//! Every run re-renders all outputs from the full trimmed collection:
//!
//! - [`text`]: `output.txt` (one line per article) and `pretty.txt`
//!   (labeled, human-readable blocks)
//! - [`rss`]: `feed.xml`, an RSS 2.0 document meant to be served as a static
//!   file over plain HTTP
//!
//! All three files land in the configured logging folder.

pub mod rss;
pub mod text;
