//! Output writer traits and types
//!
//! This module defines the trait interface for record writers and the
//! errors they report.

use crate::config::OutputFormat;
use crate::model::CommentRecord;
use crate::output::fields::FieldSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to format output: {0}")]
    Format(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record writers
///
/// A writer serializes the whole record set into one file, using only the
/// columns enabled in the field set.
pub trait RecordWriter {
    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    /// Writes `records` to `path`, replacing any existing content
    ///
    /// # Arguments
    ///
    /// * `records` - Records in discovery order
    /// * `fields` - Enabled output columns
    /// * `path` - Destination file
    fn write(&self, records: &[CommentRecord], fields: &FieldSet, path: &Path) -> OutputResult<()>;
}

/// Returns the writer for a configured format
pub fn writer_for(format: OutputFormat) -> Box<dyn RecordWriter> {
    match format {
        OutputFormat::Json => Box::new(super::JsonWriter),
        OutputFormat::Csv => Box::new(super::CsvWriter),
        OutputFormat::Sqlite => Box::new(super::SqliteWriter),
    }
}
