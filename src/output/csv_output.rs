//! CSV record writer

use crate::model::CommentRecord;
use crate::output::fields::FieldSet;
use crate::output::traits::{OutputResult, RecordWriter};
use std::path::Path;

/// Writes one header row of enabled columns, then one row per record
///
/// Absent values are written as empty cells.
pub struct CsvWriter;

impl RecordWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, records: &[CommentRecord], fields: &FieldSet, path: &Path) -> OutputResult<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(fields.columns())?;

        for record in records {
            writer.write_record(
                fields
                    .project(record)
                    .iter()
                    .map(|(_, value)| value.to_string()),
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
