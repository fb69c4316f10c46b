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

//! Turns Oracle cells into the strings written to the CSV extracts.
//!
//! NULL is written as an empty field, dates and timestamps as ISO-8601, and
//! binary columns as standard Base64. Everything else uses the driver's own
//! text conversion.

use crate::domain::errors::Result;
use base64::{engine::general_purpose, Engine as _};
use oracle::sql_type::{OracleType, Timestamp};
use oracle::Row;

/// Stringifies column `i` of `row` according to its declared type.
pub fn format_value(row: &Row, i: usize, otype: &OracleType) -> Result<String> {
    match otype {
        OracleType::Date
        | OracleType::Timestamp(_)
        | OracleType::TimestampTZ(_)
        | OracleType::TimestampLTZ(_) => {
            let v: Option<Timestamp> = row.get(i)?;
            Ok(v.map(|ts| format_timestamp(&ts, otype)).unwrap_or_default())
        }
        OracleType::Raw(_) | OracleType::LongRaw | OracleType::BLOB => {
            let v: Option<Vec<u8>> = row.get(i)?;
            Ok(v.map(|b| general_purpose::STANDARD.encode(b))
                .unwrap_or_default())
        }
        _ => {
            let v: Option<String> = row.get(i)?;
            Ok(v.unwrap_or_default())
        }
    }
}

/// ISO-8601 rendering. `DATE` has no fractional part; the timestamp types
/// carry microseconds, and the zoned ones an explicit offset.
pub fn format_timestamp(ts: &Timestamp, otype: &OracleType) -> String {
    let date_time = format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        ts.year(),
        ts.month(),
        ts.day(),
        ts.hour(),
        ts.minute(),
        ts.second()
    );

    match otype {
        OracleType::Date => date_time,
        OracleType::TimestampTZ(_) | OracleType::TimestampLTZ(_) => format!(
            "{}.{:06}{}",
            date_time,
            ts.nanosecond() / 1000,
            format_offset(ts.tz_hour_offset(), ts.tz_minute_offset())
        ),
        _ => format!("{}.{:06}", date_time, ts.nanosecond() / 1000),
    }
}

/// `+HH:MM` / `-HH:MM`. Oracle reports both parts with the same sign.
pub fn format_offset(hours: i32, minutes: i32) -> String {
    let sign = if hours < 0 || minutes < 0 { '-' } else { '+' };
    format!("{}{:02}:{:02}", sign, hours.abs(), minutes.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp() {
        let ts = Timestamp::new(2023, 10, 27, 14, 30, 45, 123456000).unwrap();
        assert_eq!(
            format_timestamp(&ts, &OracleType::Timestamp(6)),
            "2023-10-27T14:30:45.123456"
        );

        let ts2 = Timestamp::new(2023, 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(
            format_timestamp(&ts2, &OracleType::Timestamp(6)),
            "2023-01-01T00:00:00.000000"
        );
    }

    #[test]
    fn test_format_date_drops_fraction() {
        let ts = Timestamp::new(1999, 12, 31, 23, 59, 59, 0).unwrap();
        assert_eq!(format_timestamp(&ts, &OracleType::Date), "1999-12-31T23:59:59");
    }

    #[test]
    fn test_format_zoned_timestamp() {
        let ts = Timestamp::new(2023, 10, 27, 14, 30, 45, 123456000)
            .unwrap()
            .and_tz_hm_offset(-3, -30)
            .unwrap();
        assert_eq!(
            format_timestamp(&ts, &OracleType::TimestampTZ(6)),
            "2023-10-27T14:30:45.123456-03:30"
        );

        let utc = Timestamp::new(2023, 1, 1, 0, 0, 0, 0)
            .unwrap()
            .and_tz_hm_offset(0, 0)
            .unwrap();
        assert_eq!(
            format_timestamp(&utc, &OracleType::TimestampLTZ(6)),
            "2023-01-01T00:00:00.000000+00:00"
        );
    }

    #[test]
    fn test_format_offset() {
        assert_eq!(format_offset(0, 0), "+00:00");
        assert_eq!(format_offset(5, 30), "+05:30");
        assert_eq!(format_offset(-3, -30), "-03:30");
        assert_eq!(format_offset(0, -45), "-00:45");
    }
}
