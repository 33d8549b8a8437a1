//! Time utilities: timestamp parsing/formatting and hour arithmetic.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .ok()
}

/// Parse a full timestamp, or a bare `HH:MM[:SS]` placed on `date`.
pub fn parse_timestamp(raw: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| parse_time(raw).map(|t| date.and_time(t)))
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Hours from `start` to `end`; `0` when `end` is not after `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let secs = (end - start).num_seconds();
    if secs <= 0 {
        0.0
    } else {
        secs as f64 / 3600.0
    }
}
