//! Lenient conversion of raw export fields into typed values.
//!
//! Each `try_*` helper classifies a failure as a `ParseIssue`. The plain
//! helpers apply the leniency policy directly: bad numbers become zero and bad
//! timestamps become `None`, so a dirty export never aborts a run.

use crate::error::ParseIssue;
use crate::month::{MonthKey, YEAR_RANGE};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Timestamp layouts that carry an explicit UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
];

/// Timestamp layouts without an offset. These are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Returns the trimmed field, or `ParseIssue::Missing` if it is absent or blank.
pub fn non_blank(raw: Option<&str>) -> Result<&str, ParseIssue> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ParseIssue::Missing)
}

/// Parses a decimal amount such as `"19.99"`, `"-4"` or `"1.5e2"`.
pub fn try_parse_number(raw: Option<&str>) -> Result<Decimal, ParseIssue> {
    let text = non_blank(raw)?;
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| ParseIssue::invalid(text))
}

/// Parses a decimal amount, substituting zero for anything unusable.
pub fn parse_number(raw: Option<&str>) -> Decimal {
    try_parse_number(raw).unwrap_or(Decimal::ZERO)
}

/// Parses a whole-number quantity. Fractional text such as `"2.0"` is invalid.
pub fn try_parse_quantity(raw: Option<&str>) -> Result<i64, ParseIssue> {
    let text = non_blank(raw)?;
    text.parse::<i64>().map_err(|_| ParseIssue::invalid(text))
}

/// Parses a quantity, substituting zero for anything unusable.
pub fn parse_quantity(raw: Option<&str>) -> i64 {
    try_parse_quantity(raw).unwrap_or(0)
}

/// Parses an ISO-8601 purchase timestamp.
///
/// A trailing `Z` is read as `+00:00`. Offsets are preserved so that month
/// truncation happens in the marketplace's own wall-clock time. Timestamps
/// without an offset, and bare dates, are taken as UTC. Signed or five-digit
/// years, and year zero, are invalid.
pub fn try_parse_timestamp(raw: Option<&str>) -> Result<DateTime<FixedOffset>, ParseIssue> {
    let text = non_blank(raw)?;
    let normalized = match text.strip_suffix('Z').or_else(|| text.strip_suffix('z')) {
        Some(head) => format!("{head}+00:00"),
        None => text.to_string(),
    };

    parse_any_layout(&normalized)
        .filter(|ts| YEAR_RANGE.contains(&ts.year()))
        .ok_or_else(|| ParseIssue::invalid(text))
}

fn parse_any_layout(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts);
    }
    for format in OFFSET_FORMATS {
        if let Ok(ts) = DateTime::parse_from_str(text, format) {
            return Some(ts);
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().into());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().into())
}

/// Parses a purchase timestamp, yielding `None` for anything unusable.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    try_parse_timestamp(raw).ok()
}

/// Canonical `YYYY-MM` key for a raw timestamp, or `None` if it is absent or malformed.
pub fn parse_month_key(raw: Option<&str>) -> Option<MonthKey> {
    parse_timestamp(raw).and_then(|ts| MonthKey::from_timestamp(&ts))
}
