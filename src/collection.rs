//! Merge/dedupe engine and trimmer for the article collection.
//!
//! The collection is an ordered `Vec<Article>`, oldest first. Ordering is
//! load-bearing: the trimmer evicts from the front, and the feed renders the
//! back first. Together with the move-to-end merge below this makes the
//! collection a move-to-end-on-update structure keyed by `article_id`.
//!
//! `merge` must run before `trim` so a story that reappeared in the latest
//! fetch has already been moved to the end and is never evicted ahead of
//! genuinely stale entries.

use crate::models::Article;
use tracing::{debug, info};

/// Remove the first record whose `article_id` matches, reporting whether one
/// was found. Position within the collection is irrelevant.
pub fn remove_article_by_id(collection: &mut Vec<Article>, article_id: &str) -> bool {
    match collection
        .iter()
        .position(|a| a.article_id == article_id)
    {
        Some(index) => {
            collection.remove(index);
            debug!(article_id, "Removed stale copy of article");
            true
        }
        None => {
            debug!(article_id, "Article not previously seen");
            false
        }
    }
}

/// Merge freshly fetched records into the collection.
///
/// Each new record evicts any prior record with the same `article_id` and is
/// appended at the end, so a refetched story carries its fresh fields (score,
/// summaries) and is protected from FIFO eviction. Duplicate ids within
/// `new_records` are processed independently in order: the last occurrence
/// wins and ends up last.
pub fn merge(collection: &mut Vec<Article>, new_records: Vec<Article>) {
    let fetched = new_records.len();
    let mut replaced = 0usize;

    for record in new_records {
        if remove_article_by_id(collection, &record.article_id) {
            replaced += 1;
        }
        collection.push(record);
    }

    info!(
        fetched,
        replaced,
        total = collection.len(),
        "Merged new articles into collection"
    );
}

/// Evict the oldest entries (front of the collection) until at most
/// `max_size` remain. A `max_size` of zero empties the collection.
pub fn trim(collection: &mut Vec<Article>, max_size: usize) {
    while collection.len() > max_size {
        collection.remove(0);
    }
    info!(len = collection.len(), max_size, "Collection trimmed");
}
