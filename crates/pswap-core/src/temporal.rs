//! # Temporal Types
//!
//! Lenient date/instant parsing for case-store data and a UTC-only
//! [`Timestamp`] for values this workspace writes.
//!
//! The case store and the flight schedule are not consistent about their
//! formats: some rows carry RFC 3339 instants, some a bare
//! `YYYY-MM-DD HH:MM:SS` without offset, some a plain calendar date. Offset-less
//! values are read as UTC. Parsing never fails loudly here; callers decide
//! what an unparsable value means (the filter and classifier exclude it).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Offset-less date-time layouts accepted after RFC 3339.
const NAIVE_LAYOUTS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Calendar date layout used by the flight schedule and the filter bar.
const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parse an instant from any of the accepted layouts.
///
/// Returns `None` when no layout matches.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, DATE_LAYOUT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a calendar date.
///
/// A full instant is accepted as well and reduced to its UTC date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, DATE_LAYOUT)
        .ok()
        .or_else(|| parse_instant(s).map(|dt| dt.date_naive()))
}

/// Whole days elapsed from `then` to `now`, truncated toward zero.
///
/// A case closed 30.5 days ago counts as 30. A `then` in the future
/// yields zero or a negative count.
pub fn elapsed_whole_days(now: &DateTime<Utc>, then: &DateTime<Utc>) -> i64 {
    now.signed_duration_since(*then).num_days()
}

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 format with `Z` suffix (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
