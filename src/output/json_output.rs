//! JSON record writer

use crate::model::CommentRecord;
use crate::output::fields::FieldSet;
use crate::output::traits::{OutputResult, RecordWriter};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a pretty-printed array of objects; absent values are omitted
pub struct JsonWriter;

impl JsonWriter {
    fn to_object(record: &CommentRecord, fields: &FieldSet) -> OutputResult<Map<String, Value>> {
        let mut object = Map::new();
        for (column, value) in fields.project(record) {
            if value.is_null() {
                continue;
            }
            object.insert(column.to_string(), serde_json::to_value(value)?);
        }
        Ok(object)
    }
}

impl RecordWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, records: &[CommentRecord], fields: &FieldSet, path: &Path) -> OutputResult<()> {
        let rows = records
            .iter()
            .map(|record| Self::to_object(record, fields).map(Value::Object))
            .collect::<OutputResult<Vec<_>>>()?;

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &rows)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}
