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

//! Runs a single export invocation and prints the response as JSON.

use clap::Parser;
use log::error;
use oracle_s3_exporter::application::orchestrator::Orchestrator;
use oracle_s3_exporter::config::{env_lookup, CliArgs, ExportSettings};
use oracle_s3_exporter::domain::entities::InvocationResponse;
use oracle_s3_exporter::infrastructure::oracle::session::OracleConnector;
use oracle_s3_exporter::infrastructure::s3::s3_store::S3StoreProvider;
use std::process;

fn main() {
    // 1. Initialize Logging
    env_logger::init();

    // 2. Parse Arguments
    let args = CliArgs::parse();

    // 3. Load optional settings file, then apply CLI overrides
    let mut settings = match &args.config {
        Some(path) => match ExportSettings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to load config: {}", e);
                respond(&InvocationResponse::failure(&e));
            }
        },
        None => ExportSettings::default(),
    };
    settings.merge_cli(&args);

    // The event is opaque to the exporter; keep whatever we were given.
    let event = args
        .event
        .as_deref()
        .map(|raw| {
            serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
        })
        .unwrap_or_else(|| serde_json::json!({}));

    // 4. Run
    let orchestrator = Orchestrator::new(Box::new(OracleConnector), Box::new(S3StoreProvider));
    let response = orchestrator.handle_invocation(&event, env_lookup, &settings);

    respond(&response);
}

fn respond(response: &InvocationResponse) -> ! {
    match serde_json::to_string(response) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Failed to serialize response: {}", e),
    }
    process::exit(if response.is_success() { 0 } else { 1 });
}
