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

//! # Domain Entities
//!
//! The "Nouns" of the exporter: the rows we pull out of a table, the files we
//! write, the uploads we attempt and the report we hand back to the caller.
//!
//! We use `serde` so the summary and response can be printed as JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::errors::ExportError;

/// Body returned on a fully successful invocation.
pub const SUCCESS_BODY: &str = "Data exported successfully and uploaded to S3";

/// `TableData` is a fully materialized query result.
///
/// Every row has already been fetched and every cell already stringified, so
/// the session that produced it is free to run the next query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    /// Column names, in the positional order returned by the query.
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// `ExtractFile` describes one CSV written to local ephemeral storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractFile {
    pub table: String,
    pub path: PathBuf,
    /// Data rows written, excluding the header.
    pub rows: u64,
    pub bytes: u64,
}

/// `UploadRequest` is the (file, bucket, key) triple handed to the object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub local_path: PathBuf,
    pub bucket: String,
    pub object_key: String,
}

/// Result of a single upload attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub object_key: String,
    pub success: bool,
}

/// Per-table line of the run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub table: String,
    pub file: PathBuf,
    pub rows: u64,
    pub bytes: u64,
}

/// `RunSummary` is the "Report Card" for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub bucket: String,
    pub tables: Vec<TableSummary>,
    pub uploads_succeeded: usize,
    pub uploads_failed: usize,
    pub failed_keys: Vec<String>,
}

impl RunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        duration_seconds: f64,
        bucket: String,
        files: &[ExtractFile],
        uploads: &[UploadOutcome],
    ) -> Self {
        let tables = files
            .iter()
            .map(|f| TableSummary {
                table: f.table.clone(),
                file: f.path.clone(),
                rows: f.rows,
                bytes: f.bytes,
            })
            .collect();
        let failed_keys: Vec<String> = uploads
            .iter()
            .filter(|u| !u.success)
            .map(|u| u.object_key.clone())
            .collect();

        Self {
            started_at,
            duration_seconds,
            bucket,
            tables,
            uploads_succeeded: uploads.len() - failed_keys.len(),
            uploads_failed: failed_keys.len(),
            failed_keys,
        }
    }

    pub fn total_rows(&self) -> u64 {
        self.tables.iter().map(|t| t.rows).sum()
    }
}

/// What the invocation boundary returns, success or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RunSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

impl InvocationResponse {
    pub fn success(summary: RunSummary) -> Self {
        Self {
            status_code: 200,
            body: SUCCESS_BODY.to_string(),
            summary: Some(summary),
            error_kind: None,
        }
    }

    pub fn failure(err: &ExportError) -> Self {
        Self {
            status_code: 500,
            body: format!("Error: {}", err),
            summary: None,
            error_kind: Some(err.kind().to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_failed_uploads() {
        let files = vec![ExtractFile {
            table: "ADDRESS".into(),
            path: PathBuf::from("/tmp/ADDRESS_output.csv"),
            rows: 3,
            bytes: 42,
        }];
        let uploads = vec![
            UploadOutcome {
                object_key: "s3_ADDRESS_output.csv".into(),
                success: true,
            },
            UploadOutcome {
                object_key: "s3_CIRCUIT_output.csv".into(),
                success: false,
            },
        ];

        let summary = RunSummary::new(Utc::now(), 1.5, "bucket".into(), &files, &uploads);
        assert_eq!(summary.uploads_succeeded, 1);
        assert_eq!(summary.uploads_failed, 1);
        assert_eq!(summary.failed_keys, vec!["s3_CIRCUIT_output.csv"]);
        assert_eq!(summary.total_rows(), 3);
    }

    #[test]
    fn test_response_serializes_with_camel_case() {
        let err = ExportError::MissingConfig(vec!["S3_BUCKET_NAME".into()]);
        let resp = InvocationResponse::failure(&err);
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["statusCode"], 500);
        assert_eq!(
            json["body"],
            "Error: Missing required configuration: S3_BUCKET_NAME"
        );
        assert_eq!(json["errorKind"], "configuration");
        assert!(json.get("summary").is_none());
    }
}
