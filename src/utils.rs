//! Helpers for date resolution, logging, and file system checks.

use crate::settings::Settings;
use chrono::{Duration, Local, NaiveDate};
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Resolve the target listing date.
///
/// An explicit, non-empty `override_date` from settings wins; otherwise the
/// date is yesterday relative to the wall clock, formatted `YYYY-MM-DD`.
pub fn resolve_date(settings: &Settings) -> String {
    resolve_date_from(settings, Local::now().date_naive())
}

fn resolve_date_from(settings: &Settings, today: NaiveDate) -> String {
    match settings.override_date.as_deref() {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => (today - Duration::days(1)).format("%Y-%m-%d").to_string(),
    }
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` bytes with an ellipsis and the elided byte
/// count appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
