//! Markdown run report
//!
//! This module generates a human-readable markdown report of a crawl run,
//! including the overall statistics, a per-video table and every error.

use crate::output::stats::format_duration;
use crate::output::traits::OutputResult;
use crate::state::RunStats;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Context rendered alongside the statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportContext<'a> {
    /// SHA-256 of the configuration file, if one was loaded
    pub config_hash: Option<&'a str>,

    /// File the records were written to, if any
    pub records_path: Option<&'a Path>,
}

/// Generates a markdown report from run statistics
///
/// # Arguments
///
/// * `stats` - The finalized run statistics
/// * `context` - Config hash and output location
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_report(
    stats: &RunStats,
    context: ReportContext<'_>,
    output_path: &Path,
) -> OutputResult<()> {
    let markdown = format_markdown_report(stats, context);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats run statistics as markdown
pub fn format_markdown_report(stats: &RunStats, context: ReportContext<'_>) -> String {
    let mut md = String::new();

    md.push_str("# Comment Crawl Report\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Started**: {}\n", stats.started_at.to_rfc3339()));
    if let Some(finished) = stats.finished_at {
        md.push_str(&format!("- **Finished**: {}\n", finished.to_rfc3339()));
    }
    md.push_str(&format!(
        "- **Duration**: {}\n",
        format_duration(stats.duration())
    ));
    let status = if stats.interrupted {
        "interrupted"
    } else {
        "completed"
    };
    md.push_str(&format!("- **Status**: {}\n", status));
    if let Some(hash) = context.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    if let Some(path) = context.records_path {
        md.push_str(&format!("- **Records File**: {}\n", path.display()));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Videos Processed**: {}/{}\n",
        stats.processed_videos, stats.total_videos
    ));
    md.push_str(&format!("- **Videos Skipped**: {}\n", stats.skipped_videos));
    md.push_str(&format!("- **Comments**: {}\n", stats.total_comments));
    md.push_str(&format!("- **Replies**: {}\n", stats.total_replies));
    md.push_str(&format!("- **API Calls**: {}\n", stats.api_calls));
    md.push_str(&format!(
        "- **Rate**: {:.1} records/minute\n\n",
        stats.records_per_minute()
    ));

    // Per-video breakdown
    if !stats.videos.is_empty() {
        md.push_str("## Videos\n\n");
        md.push_str("| # | Video | Title | State | Comments | Replies | API Calls |\n");
        md.push_str("|---|-------|-------|-------|----------|---------|-----------|\n");

        for video in &stats.videos {
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                video.index,
                video.video_id,
                escape_cell(video.title.as_deref().unwrap_or("-")),
                video.state,
                video.comments,
                video.replies,
                video.api_calls
            ));
        }
        md.push('\n');
    }

    // Errors
    if !stats.errors.is_empty() {
        md.push_str("## Errors\n\n");
        md.push_str(&format!("Total: {}\n\n", stats.errors.len()));
        for error in &stats.errors {
            md.push_str(&format!("- {}\n", error));
        }
        md.push('\n');
    }

    md
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
