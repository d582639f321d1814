//! Parsing of the `sent_at` column.
//!
//! Kik exports have shipped timestamps in several shapes over the years, so
//! parsing tries each known layout in turn:
//!
//! - RFC 3339 (`2021-05-01T12:30:00Z`, `2021-05-01T12:30:00+02:00`)
//! - `2021-05-01 12:30:00[.123]`, with `T` or space, optionally `UTC`-suffixed
//!   or followed by a numeric offset
//! - `05/01/2021 12:30:00` and `2021/05/01 12:30:00`
//! - bare dates (`2021-05-01`), read as midnight UTC
//! - Unix epochs in seconds, or milliseconds for values above 10^11
//!
//! Offset-less values are taken to be UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Epoch values above this are milliseconds (10^11 seconds is year 5138).
const MILLIS_THRESHOLD: u64 = 100_000_000_000;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a timestamp cell.
///
/// Returns `None` if the value matches none of the supported layouts. Blank
/// cells are the caller's concern; this function treats them as unparseable.
///
/// # Example
///
/// ```
/// use kikview::core::timestamp::parse_timestamp;
///
/// let a = parse_timestamp("2021-05-01 12:30:00 UTC").unwrap();
/// let b = parse_timestamp("1619872200").unwrap();
/// assert_eq!(a, b);
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(ts) = parse_epoch(value) {
        return Some(ts);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.to_utc());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, fmt) {
            return Some(dt.to_utc());
        }
    }

    let naive = value
        .strip_suffix(" UTC")
        .or_else(|| value.strip_suffix('Z'))
        .unwrap_or(value)
        .trim_end();

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, fmt) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

fn parse_epoch(value: &str) -> Option<DateTime<Utc>> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let n: i64 = value.parse().ok()?;
    if n.unsigned_abs() > MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(n)
    } else {
        DateTime::from_timestamp(n, 0)
    }
}
