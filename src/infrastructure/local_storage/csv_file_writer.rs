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

//! Writes a materialized table to a CSV file on local ephemeral storage.

use crate::domain::entities::TableData;
use crate::domain::errors::Result;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the header row and then every data row to `path`, replacing any
/// previous file. Returns the number of bytes on disk.
pub fn write_table_csv(path: &Path, data: &TableData) -> Result<u64> {
    let file = File::create(path)?;
    let buf_writer = BufWriter::with_capacity(128 * 1024, file);

    let mut wtr = WriterBuilder::new()
        .delimiter(b',')
        .quote_style(QuoteStyle::Necessary)
        .from_writer(buf_writer);

    wtr.write_record(&data.columns)?;
    for row in &data.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    drop(wtr);

    Ok(std::fs::metadata(path)?.len())
}
