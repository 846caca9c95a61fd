// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! RFC3339 <-> epoch-millisecond conversion at the HTTP boundary: parse
//! RFC3339 on the way in, store/query milliseconds, format back to
//! RFC3339 on the way out.

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid RFC3339 timestamp: {0}")]
pub struct TimestampParseError(pub String);

/// Parse an RFC3339 timestamp string into epoch milliseconds.
pub fn rfc3339_to_millis(s: &str) -> Result<i64, TimestampParseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).timestamp_millis())
        .map_err(|_| TimestampParseError(s.to_string()))
}

/// Format epoch milliseconds as an RFC3339 timestamp string.
///
/// Falls back to the Unix epoch string for the practically unreachable case
/// of an out-of-range timestamp, rather than panicking.
pub fn millis_to_rfc3339(ms: i64) -> String {
    let secs = ms.div_euclid(1000);
    let nanos = (ms.rem_euclid(1000) * 1_000_000) as u32;
    match Utc.timestamp_opt(secs, nanos).single() {
        Some(dt) => dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        None => "1970-01-01T00:00:00Z".to_string(),
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
