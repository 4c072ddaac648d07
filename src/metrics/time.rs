use chrono::{DateTime, Utc};

use super::MetricsError;

/// Parse an RFC 3339 timestamp and normalize it to UTC.
///
/// `field` names the source field in the error; a bad value is never
/// replaced with a default.
pub fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, MetricsError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| MetricsError::MalformedTimestamp {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

/// Elapsed minutes from `start` to `end`, to the millisecond.
/// Negative when `end` precedes `start`.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}
