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

//! # Database Port
//!
//! This Port defines what it means to "pull a whole table" out of a database.
//! The application never sees a cursor: it asks a `TableSession` for a table's
//! complete contents and gets them back fully materialized.

use crate::config::DatabaseConfig;
use crate::domain::entities::TableData;
use crate::domain::errors::Result;

/// Opens sessions. Split from `TableSession` so a run can be configured and
/// validated before anything touches the network.
pub trait DatabaseConnector {
    fn connect(&self, config: &DatabaseConfig) -> Result<Box<dyn TableSession>>;
}

/// A single scoped database session, used strictly sequentially.
///
/// Implementations must release the underlying connection when dropped, so an
/// error halfway through a run never leaks it.
pub trait TableSession {
    /// Executes `sql` and fetches every row before returning.
    ///
    /// Once this returns, nothing from the query is still pending on the
    /// session and the next call may reuse it.
    fn fetch_all(&mut self, sql: &str) -> Result<TableData>;

    /// Releases the session explicitly. Dropping it has the same effect but
    /// swallows any error.
    fn close(self: Box<Self>) -> Result<()>;
}
