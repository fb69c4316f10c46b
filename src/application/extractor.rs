// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Extractor
//!
//! Pulls each configured table through the session and writes it to
//! `<output_dir>/<TABLE>_output.csv`.
//!
//! Any failure here is fatal to the run: nothing is retried and no partial
//! result is kept, the caller simply re-runs the whole job.

use crate::domain::entities::ExtractFile;
use crate::domain::errors::{ExportError, Result};
use crate::infrastructure::local_storage::csv_file_writer::write_table_csv;
use crate::ports::database_port::TableSession;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Full-table query. Table and schema are trusted, pre-validated identifiers.
pub fn build_query(schema: &str, table: &str) -> String {
    format!("SELECT * FROM {}.{}", schema, table)
}

pub fn extract_file_path(output_dir: &Path, table: &str) -> PathBuf {
    output_dir.join(format!("{}_output.csv", table))
}

/// Exports a single table.
pub fn extract_table(
    session: &mut dyn TableSession,
    schema: &str,
    table: &str,
    output_dir: &Path,
) -> Result<ExtractFile> {
    let sql = build_query(schema, table);
    let data = session.fetch_all(&sql).map_err(|e| match e {
        ExportError::OracleError(err) => ExportError::ExtractionError {
            table: table.to_string(),
            reason: err.to_string(),
        },
        other => other,
    })?;
    debug!(
        "{}: {} columns, {} rows",
        table,
        data.columns.len(),
        data.row_count()
    );

    let path = extract_file_path(output_dir, table);
    let bytes = write_table_csv(&path, &data)?;

    info!("Data exported to {}", path.display());

    Ok(ExtractFile {
        table: table.to_string(),
        path,
        rows: data.row_count() as u64,
        bytes,
    })
}

/// Exports every table in order, stopping at the first error.
pub fn extract_tables(
    session: &mut dyn TableSession,
    tables: &[String],
    schema: &str,
    output_dir: &Path,
) -> Result<Vec<ExtractFile>> {
    std::fs::create_dir_all(output_dir)?;

    let mut files = Vec::with_capacity(tables.len());
    for table in tables {
        files.push(extract_table(session, schema, table, output_dir)?);
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TableData;
    use std::collections::HashMap;

    /// Serves canned tables and records every query it sees.
    #[derive(Default)]
    struct StubSession {
        pub tables: HashMap<String, TableData>,
        pub queries: Vec<String>,
    }

    impl TableSession for StubSession {
        fn fetch_all(&mut self, sql: &str) -> Result<TableData> {
            self.queries.push(sql.to_string());
            let table = sql.rsplit('.').next().unwrap_or_default();
            self.tables
                .get(table)
                .cloned()
                .ok_or_else(|| ExportError::ExtractionError {
                    table: table.to_string(),
                    reason: "ORA-00942: table or view does not exist".into(),
                })
        }

        fn close(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    fn address() -> TableData {
        TableData::new(
            vec!["ADDRESS_ID".into(), "CITY".into(), "ZIP".into()],
            vec![
                vec!["1".into(), "Denver".into(), "80202".into()],
                vec!["2".into(), "Boulder".into(), "".into()],
            ],
        )
    }

    #[test]
    fn test_build_query() {
        assert_eq!(
            build_query("database.schema", "ADDRESS"),
            "SELECT * FROM database.schema.ADDRESS"
        );
    }

    #[test]
    fn test_extract_file_path() {
        assert_eq!(
            extract_file_path(Path::new("/tmp"), "CIRCUIT"),
            PathBuf::from("/tmp/CIRCUIT_output.csv")
        );
    }

    #[test]
    fn test_header_matches_query_columns() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = StubSession::default();
        session.tables.insert("ADDRESS".into(), address());

        let file = extract_table(&mut session, "database.schema", "ADDRESS", dir.path()).unwrap();

        assert_eq!(file.rows, 2);
        assert_eq!(file.path, dir.path().join("ADDRESS_output.csv"));
        let contents = std::fs::read_to_string(&file.path).unwrap();
        assert_eq!(contents.lines().next(), Some("ADDRESS_ID,CITY,ZIP"));
        assert_eq!(contents.lines().count(), 3);
    }

    #[test]
    fn test_one_file_per_table_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let mut session = StubSession::default();
        session.tables.insert("ADDRESS".into(), address());
        session.tables.insert(
            "NE_TYPE".into(),
            TableData::new(vec!["NE_TYPE".into()], vec![]),
        );

        let tables = vec!["NE_TYPE".to_string(), "ADDRESS".to_string()];
        let files = extract_tables(&mut session, &tables, "S", &out).unwrap();

        let names: Vec<&str> = files.iter().map(|f| f.table.as_str()).collect();
        assert_eq!(names, vec!["NE_TYPE", "ADDRESS"]);
        assert_eq!(
            session.queries,
            vec!["SELECT * FROM S.NE_TYPE", "SELECT * FROM S.ADDRESS"]
        );
        assert_eq!(files[0].rows, 0);
        assert!(files.iter().all(|f| f.path.exists()));
    }

    #[test]
    fn test_first_failure_aborts_remaining_tables() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = StubSession::default();
        session.tables.insert("ADDRESS".into(), address());

        let tables = vec![
            "ADDRESS".to_string(),
            "MISSING".to_string(),
            "ADDRESS".to_string(),
        ];
        let err = extract_tables(&mut session, &tables, "S", dir.path()).unwrap_err();

        assert!(matches!(err, ExportError::ExtractionError { ref table, .. } if table == "MISSING"));
        assert_eq!(session.queries.len(), 2);
    }
}
