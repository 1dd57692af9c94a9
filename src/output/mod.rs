//! Output module for persisting records and reporting runs
//!
//! This module handles:
//! - Selecting output columns
//! - Writing records as JSON, CSV or SQLite
//! - Saving a snapshot of the effective configuration
//! - Console and markdown run summaries

mod csv_output;
mod fields;
mod json_output;
mod markdown;
mod sqlite_output;
pub mod stats;
mod traits;

pub use csv_output::CsvWriter;
pub use fields::{FieldSet, FieldValue, OutputField};
pub use json_output::JsonWriter;
pub use markdown::{format_markdown_report, generate_markdown_report, ReportContext};
pub use sqlite_output::{SqliteWriter, TABLE_NAME};
pub use stats::{format_statistics, print_statistics};
pub use traits::{writer_for, OutputError, OutputResult, RecordWriter};

use crate::config::{Config, OutputConfig};
use crate::model::CommentRecord;
use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Where the files of one run are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    directory: PathBuf,
    base_name: String,
}

impl OutputTarget {
    /// Builds `{prefix}_{YYYYmmdd_HHMMSS}` (or just `{prefix}`) under the output directory
    pub fn new(config: &OutputConfig, now: NaiveDateTime) -> Self {
        let base_name = if config.include_timestamp {
            format!("{}_{}", config.filename_prefix, now.format("%Y%m%d_%H%M%S"))
        } else {
            config.filename_prefix.clone()
        };

        Self {
            directory: config.directory.clone(),
            base_name,
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn records_path(&self, extension: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", self.base_name, extension))
    }

    pub fn config_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}_config.json", self.base_name))
    }
}

/// Files produced by [`persist`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOutput {
    pub records_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Serialize)]
struct ConfigSnapshot<'a> {
    saved_at: String,
    config_hash: Option<&'a str>,
    config: &'a Config,
}

/// Writes the records and, when enabled, the configuration snapshot
///
/// Nothing is written when `records` is empty.
///
/// # Returns
///
/// * `Ok(Some(PersistedOutput))` - Files written
/// * `Ok(None)` - No records to write
/// * `Err(OutputError)` - Writing failed
pub fn persist(
    records: &[CommentRecord],
    config: &Config,
    config_hash: Option<&str>,
) -> OutputResult<Option<PersistedOutput>> {
    if records.is_empty() {
        tracing::warn!("No records collected, nothing to save");
        return Ok(None);
    }

    let now = Local::now();
    let target = OutputTarget::new(&config.output, now.naive_local());
    fs::create_dir_all(&config.output.directory)?;

    let fields = FieldSet::from_config(config);
    let writer = writer_for(config.output.format);
    let records_path = target.records_path(writer.extension());
    writer.write(records, &fields, &records_path)?;
    tracing::info!(
        "Saved {} records ({} columns) to {}",
        records.len(),
        fields.len(),
        records_path.display()
    );

    let config_path = if config.output.save_config {
        let path = target.config_path();
        save_config_snapshot(config, config_hash, &now.to_rfc3339(), &path)?;
        tracing::info!("Saved configuration to {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(Some(PersistedOutput {
        records_path,
        config_path,
        rows: records.len(),
        columns: fields.len(),
    }))
}

/// Writes the effective configuration as pretty JSON
///
/// The API key is never included.
pub fn save_config_snapshot(
    config: &Config,
    config_hash: Option<&str>,
    saved_at: &str,
    path: &Path,
) -> OutputResult<()> {
    let snapshot = ConfigSnapshot {
        saved_at: saved_at.to_string(),
        config_hash,
        config,
    };
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(path, json)?;
    Ok(())
}
