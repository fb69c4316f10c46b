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

//! The core application logic that drives one export invocation.
//!
//! Extraction runs to completion for every table before the first upload
//! starts. The database session lives only for the extraction phase.

use crate::application::extractor::extract_tables;
use crate::application::uploader::upload_files;
use crate::config::{AppConfig, ExportSettings};
use crate::domain::entities::{InvocationResponse, RunSummary};
use crate::domain::errors::Result;
use crate::ports::database_port::DatabaseConnector;
use crate::ports::object_store_port::ObjectStoreProvider;
use chrono::Utc;
use log::{error, info, warn};
use std::time::Instant;

/// Orchestrates the export of the configured tables to the object store.
pub struct Orchestrator {
    connector: Box<dyn DatabaseConnector>,
    store_provider: Box<dyn ObjectStoreProvider>,
}

impl Orchestrator {
    pub fn new(
        connector: Box<dyn DatabaseConnector>,
        store_provider: Box<dyn ObjectStoreProvider>,
    ) -> Self {
        Self {
            connector,
            store_provider,
        }
    }

    /// Invocation boundary. Always returns a response, never panics or aborts.
    ///
    /// Configuration is resolved through `lookup` and validated before any
    /// connection is attempted. The `event` payload is accepted but unused.
    pub fn handle_invocation<F>(
        &self,
        _event: &serde_json::Value,
        lookup: F,
        settings: &ExportSettings,
    ) -> InvocationResponse
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match AppConfig::load(lookup, settings) {
            Ok(c) => c,
            Err(e) => {
                error!("Invalid configuration: {}", e);
                return InvocationResponse::failure(&e);
            }
        };

        match self.run(&config) {
            Ok(summary) => InvocationResponse::success(summary),
            Err(e) => {
                error!("Export failed: {}", e);
                InvocationResponse::failure(&e)
            }
        }
    }

    /// Runs extraction then upload for an already validated configuration.
    ///
    /// Upload failures are counted in the summary and are not an error.
    pub fn run(&self, config: &AppConfig) -> Result<RunSummary> {
        let started_at = Utc::now();
        let start_time = Instant::now();
        info!(
            "Exporting {} tables from {}",
            config.export.tables.len(),
            config.export.schema
        );

        let store = self.store_provider.open(&config.storage)?;

        // The session is dropped, and so released, on every early return.
        let mut session = self.connector.connect(&config.database)?;
        let files = extract_tables(
            session.as_mut(),
            &config.export.tables,
            &config.export.schema,
            &config.export.output_dir,
        )?;
        if let Err(e) = session.close() {
            warn!("Error closing database session: {}", e);
        }

        let uploads = upload_files(
            store.as_ref(),
            &files,
            &config.storage.bucket,
            &config.export.key_prefix,
        );

        let summary = RunSummary::new(
            started_at,
            start_time.elapsed().as_secs_f64(),
            config.storage.bucket.clone(),
            &files,
            &uploads,
        );

        info!(
            "Export finished. {} tables, {} rows, {}/{} uploads successful in {:.2}s",
            summary.tables.len(),
            summary.total_rows(),
            summary.uploads_succeeded,
            uploads.len(),
            summary.duration_seconds
        );
        if summary.uploads_failed > 0 {
            warn!("Failed uploads: {}", summary.failed_keys.join(", "));
        }

        Ok(summary)
    }
}
