//! Utility functions for formatting and path handling.
//!
//! This module provides general-purpose helpers used throughout the
//! hevcify-core library: elapsed-time formatting for the run summary, log
//! timestamp formatting, and safe file name/extension extraction.

use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Duration;

/// Timestamp layout used in the audit log.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats an elapsed duration for the end-of-run summary.
///
/// Sub-second remainders are truncated. The hours component only appears
/// once the duration reaches an hour.
///
/// ```rust
/// use hevcify_core::format_elapsed;
/// use std::time::Duration;
///
/// assert_eq!(format_elapsed(Duration::from_secs(90)), "1 minutes, 30 seconds");
/// assert_eq!(format_elapsed(Duration::from_secs(3661)), "1 hours, 1 minutes, 1 seconds");
/// ```
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_seconds = elapsed.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours} hours, {minutes} minutes, {seconds} seconds")
    } else {
        format!("{minutes} minutes, {seconds} seconds")
    }
}

/// Formats a timestamp the way the audit log expects (`YYYY-MM-DD HH:MM:SS`).
#[must_use]
pub fn format_log_timestamp(timestamp: &DateTime<Local>) -> String {
    timestamp.format(LOG_TIMESTAMP_FORMAT).to_string()
}

/// Safely extracts filename from a path with consistent error handling.
/// Returns the filename as a String, or an error if the path has no filename component.
pub fn get_filename_safe(path: &Path) -> crate::CoreResult<String> {
    Ok(path
        .file_name()
        .ok_or_else(|| {
            crate::CoreError::PathError(format!("Failed to get filename for {}", path.display()))
        })?
        .to_string_lossy()
        .to_string())
}

/// Lowercase extension of `path`, if it has one.
#[must_use]
pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
