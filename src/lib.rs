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

//! # Oracle to S3 Exporter
//!
//! A short-lived job that snapshots a fixed list of Oracle tables into CSV
//! files on local ephemeral storage and uploads each file to an S3 bucket.
//!
//! The crate follows the **Hexagonal Architecture** (Ports and Adapters):
//! `application` holds the extract/upload logic, `ports` the traits it depends
//! on, and `infrastructure` the Oracle, S3 and local-file adapters.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ports;
