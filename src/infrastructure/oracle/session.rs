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

//! Oracle implementation of the database port.

use crate::config::DatabaseConfig;
use crate::domain::entities::TableData;
use crate::domain::errors::Result;
use crate::infrastructure::oracle::value_format::format_value;
use crate::ports::database_port::{DatabaseConnector, TableSession};
use log::{debug, info};
use oracle::sql_type::OracleType;
use oracle::Connection;

/// Opens one `OracleSession` per run.
#[derive(Debug, Default)]
pub struct OracleConnector;

impl DatabaseConnector for OracleConnector {
    fn connect(&self, config: &DatabaseConfig) -> Result<Box<dyn TableSession>> {
        let conn_str = config.get_connection_string();
        info!("Connecting to Oracle at {} as {}", conn_str, config.username);

        let conn = Connection::connect(&config.username, &config.password, &conn_str)?;
        Ok(Box::new(OracleSession {
            conn,
            prefetch_rows: config.prefetch_rows,
        }))
    }
}

/// A single Oracle connection reused across every table of a run.
///
/// `oracle::Connection` releases its handle on drop, so an early return out of
/// the extraction loop still closes the session.
pub struct OracleSession {
    conn: Connection,
    prefetch_rows: u32,
}

impl TableSession for OracleSession {
    fn fetch_all(&mut self, sql: &str) -> Result<TableData> {
        debug!("Executing: {}", sql);

        let mut stmt = self
            .conn
            .statement(sql)
            .prefetch_rows(self.prefetch_rows)
            .build()?;

        let rows = stmt.query(&[])?;
        let col_infos = rows.column_info();
        let col_types: Vec<OracleType> =
            col_infos.iter().map(|c| c.oracle_type().clone()).collect();
        let columns: Vec<String> = col_infos.iter().map(|c| c.name().to_string()).collect();

        let mut data = Vec::new();
        for row_res in rows {
            let row = row_res?;
            let mut record = Vec::with_capacity(col_types.len());
            for (i, otype) in col_types.iter().enumerate() {
                record.push(format_value(&row, i, otype)?);
            }
            data.push(record);
        }

        debug!("Fetched {} rows x {} columns", data.len(), columns.len());
        Ok(TableData::new(columns, data))
    }

    fn close(self: Box<Self>) -> Result<()> {
        self.conn.close()?;
        info!("Oracle connection closed");
        Ok(())
    }
}
