//! SQLite record writer
//!
//! This module writes the record set into a `comments` table whose columns
//! follow the enabled field set. All rows go in a single transaction.

use crate::model::CommentRecord;
use crate::output::fields::FieldSet;
use crate::output::traits::{OutputError, OutputResult, RecordWriter};
use rusqlite::{params_from_iter, Connection};
use std::path::Path;

/// Table receiving the records
pub const TABLE_NAME: &str = "comments";

/// SQLite-based record writer
pub struct SqliteWriter;

impl SqliteWriter {
    /// Builds the `CREATE TABLE` statement for the enabled columns
    pub fn create_table_sql(fields: &FieldSet) -> String {
        let columns = fields
            .fields()
            .iter()
            .map(|field| format!("    \"{}\" {}", field.name(), field.sql_type()))
            .collect::<Vec<_>>()
            .join(",\n");

        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    row_id INTEGER PRIMARY KEY AUTOINCREMENT,\n{}\n)",
            TABLE_NAME, columns
        )
    }

    fn insert_sql(fields: &FieldSet) -> String {
        let columns = fields
            .columns()
            .map(|c| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=fields.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            TABLE_NAME, columns, placeholders
        )
    }
}

impl RecordWriter for SqliteWriter {
    fn extension(&self) -> &'static str {
        "db"
    }

    fn write(&self, records: &[CommentRecord], fields: &FieldSet, path: &Path) -> OutputResult<()> {
        if fields.is_empty() {
            return Err(OutputError::Format("no output columns enabled".to_string()));
        }

        let mut conn = Connection::open(path)?;
        conn.execute_batch(&format!("DROP TABLE IF EXISTS {};", TABLE_NAME))?;
        conn.execute(&Self::create_table_sql(fields), [])?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(&Self::insert_sql(fields))?;
            for record in records {
                let row = fields.project(record);
                stmt.execute(params_from_iter(row.iter().map(|(_, value)| value)))?;
            }
        }
        tx.commit()?;

        tracing::debug!("Wrote {} rows to {}", records.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CommentKind;
    use crate::output::fields::tests::sample_record;
    use crate::output::OutputField;
    use tempfile::TempDir;

    #[test]
    fn test_create_table_sql() {
        let fields = FieldSet::all();
        let sql = SqliteWriter::create_table_sql(&fields);
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS comments"));
        assert!(sql.contains("\"like_count\" INTEGER"));
        assert!(sql.contains("\"sentiment_score\" REAL"));
        assert!(sql.contains("\"comment_text\" TEXT"));
    }

    #[test]
    fn test_rows_are_inserted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.db");
        let fields = FieldSet::all().without(OutputField::AuthorProfileImageUrl);
        let records = vec![
            sample_record("c1", CommentKind::TopLevel),
            sample_record("c1.r1", CommentKind::Reply),
        ];

        SqliteWriter.write(&records, &fields, &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);

        let (kind, parent, likes, pinned): (String, Option<String>, i64, i64) = conn
            .query_row(
                "SELECT comment_type, parent_id, like_count, is_pinned FROM comments \
                 WHERE comment_id = 'c1.r1'",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
            )
            .unwrap();
        assert_eq!(kind, "reply");
        assert_eq!(parent.as_deref(), Some("parent"));
        assert_eq!(likes, 12);
        assert_eq!(pinned, 0);

        let missing = conn.prepare("SELECT author_profile_image_url FROM comments");
        assert!(missing.is_err());
    }

    #[test]
    fn test_rewrite_replaces_previous_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.db");
        let records = vec![sample_record("c1", CommentKind::TopLevel)];

        SqliteWriter.write(&records, &FieldSet::all(), &path).unwrap();
        SqliteWriter.write(&records, &FieldSet::all(), &path).unwrap();

        let conn = Connection::open(&path).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM comments", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
