//! Console run summary
//!
//! This module renders the end-of-run statistics shown on stdout.

use crate::state::RunStats;
use chrono::Duration;

/// Number of error messages shown before the remainder is summarized
pub const ERROR_PREVIEW: usize = 3;

/// Formats a duration as `HH:MM:SS`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Formats run statistics for the console
///
/// # Arguments
///
/// * `stats` - Finalized run statistics
///
/// # Returns
///
/// The summary text, one line per figure, followed by at most
/// [`ERROR_PREVIEW`] error messages
pub fn format_statistics(stats: &RunStats) -> String {
    let mut out = String::new();

    out.push_str("=== Crawl Summary ===\n\n");
    if stats.interrupted {
        out.push_str("Run interrupted; partial results kept\n\n");
    }

    out.push_str(&format!(
        "  Videos processed: {}/{}\n",
        stats.processed_videos, stats.total_videos
    ));
    if stats.skipped_videos > 0 {
        out.push_str(&format!("  Videos skipped: {}\n", stats.skipped_videos));
    }
    out.push_str(&format!("  Comments: {}\n", stats.total_comments));
    out.push_str(&format!("  Replies: {}\n", stats.total_replies));
    out.push_str(&format!("  API calls: {}\n", stats.api_calls));
    out.push_str(&format!(
        "  Duration: {}\n",
        format_duration(stats.duration())
    ));
    out.push_str(&format!(
        "  Rate: {:.1} records/minute\n",
        stats.records_per_minute()
    ));

    if !stats.errors.is_empty() {
        out.push_str(&format!("\nErrors: {}\n", stats.errors.len()));
        for error in stats.errors.iter().take(ERROR_PREVIEW) {
            out.push_str(&format!("  - {}\n", error));
        }
        if stats.errors.len() > ERROR_PREVIEW {
            out.push_str(&format!(
                "  ... and {} more\n",
                stats.errors.len() - ERROR_PREVIEW
            ));
        }
    }

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &RunStats) {
    print!("{}", format_statistics(stats));
}
