//! # Filter Engine
//!
//! Narrows a case collection by the criteria of the filter bar: a route
//! substring and an inclusive flight-date range. All criteria are optional
//! and AND-combined.
//!
//! The engine is a pure function of (cases, criteria). It preserves input
//! order, never mutates its input, and does not read the clock.
//!
//! ## Unparsable flight dates
//!
//! A case whose `flightDate` does not parse is excluded whenever a date bound
//! is active and kept when none is. It fails open only when no date filter applies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::case::SwapCase;
use crate::error::CriteriaError;
use crate::temporal::parse_calendar_date;

/// User-supplied filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the route. Blank means no route filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Earliest flight date kept (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest flight date kept (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl FilterCriteria {
    /// Build criteria from raw filter-bar input.
    ///
    /// Empty or whitespace-only strings are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidDate`] if a non-blank date bound is
    /// not a calendar date.
    pub fn parse(
        route: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> Result<Self, CriteriaError> {
        Ok(Self {
            route: route
                .filter(|r| !r.trim().is_empty())
                .map(str::to_string),
            start_date: parse_bound("start", start)?,
            end_date: parse_bound("end", end)?,
        })
    }

    /// Whether any date bound is active.
    pub fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Whether no criterion is active at all.
    pub fn is_empty(&self) -> bool {
        self.route_needle().is_none() && !self.has_date_bounds()
    }

    /// The lower-cased route needle, if the route criterion is active.
    fn route_needle(&self) -> Option<String> {
        self.route
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a single case satisfies every active criterion.
    pub fn matches(&self, case: &SwapCase) -> bool {
        self.matches_with(self.route_needle().as_deref(), case)
    }

    fn matches_with(&self, needle: Option<&str>, case: &SwapCase) -> bool {
        if let Some(needle) = needle {
            if !case.route_iata.to_lowercase().contains(needle) {
                return false;
            }
        }
        self.matches_dates(case)
    }

    fn matches_dates(&self, case: &SwapCase) -> bool {
        if !self.has_date_bounds() {
            return true;
        }
        let Some(day) = case.flight_day() else {
            return false;
        };
        if let Some(start) = self.start_date {
            if day < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if day > end {
                return false;
            }
        }
        true
    }
}

fn parse_bound(field: &'static str, raw: Option<&str>) -> Result<Option<NaiveDate>, CriteriaError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_calendar_date(s)
            .map(Some)
            .ok_or_else(|| CriteriaError::InvalidDate {
                field,
                value: s.to_string(),
            }),
    }
}

/// Keep the cases that satisfy `criteria`, in input order.
pub fn filter<'a, I>(cases: I, criteria: &FilterCriteria) -> Vec<&'a SwapCase>
where
    I: IntoIterator<Item = &'a SwapCase>,
{
    let needle = criteria.route_needle();
    cases
        .into_iter()
        .filter(|case| criteria.matches_with(needle.as_deref(), case))
        .collect()
}
