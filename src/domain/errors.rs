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

//! Core error definitions for the Oracle to S3 exporter.
//!
//! This module provides a centralized `ExportError` enum and a `Result` type
//! used throughout the application to handle Oracle, I/O, CSV and S3 errors.

use thiserror::Error;

/// Error types encountered during an export run.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Missing required configuration: {}", .0.join(", "))]
    MissingConfig(Vec<String>),

    #[error("Oracle error: {0}")]
    OracleError(#[from] oracle::Error),

    #[error("Extraction failed for {table}: {reason}")]
    ExtractionError { table: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Upload failed for {key}: {reason}")]
    StorageError { key: String, reason: String },
}

impl ExportError {
    /// Stable, machine-readable category reported as `errorKind` in a failed
    /// invocation response.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::ConfigError(_) | ExportError::MissingConfig(_) => "configuration",
            ExportError::OracleError(_) | ExportError::ExtractionError { .. } => "database",
            ExportError::IoError(_) => "io",
            ExportError::CsvError(_) => "serialization",
            ExportError::StorageError { .. } => "storage",
        }
    }
}

/// A specialized Result type for the exporter.
pub type Result<T> = std::result::Result<T, ExportError>;
