//! # Error Hierarchy
//!
//! Structured error types for the swap portal core, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Data-quality problems inside individual case records (a closed case with
//! no closure timestamp, an unparsable flight date) are NOT errors: the
//! filter and classifier absorb them by exclusion. The types here cover the
//! caller-facing failures only: invalid identifiers, invalid filter criteria,
//! case-store records that cannot be normalized, and wizard misuse.

use thiserror::Error;

/// Top-level error type for the swap portal core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Filter criteria supplied by the caller are not usable.
    #[error("invalid filter criteria: {0}")]
    Criteria(#[from] CriteriaError),

    /// A case-store record could not be mapped onto a swap case.
    #[error("normalization error: {0}")]
    Normalization(#[from] NormalizationError),

    /// The swap request wizard was driven out of order.
    #[error("swap request error: {0}")]
    Request(#[from] RequestError),

    /// The snapshot is not a sequence of record-shaped values.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Case identifier is empty or whitespace.
    #[error("invalid case ID: must be non-empty")]
    EmptyCaseId,

    /// Pilot identifier is empty or whitespace.
    #[error("invalid pilot ID: must be non-empty")]
    EmptyPilotId,
}

/// Errors raised while building [`FilterCriteria`](crate::filter::FilterCriteria)
/// from user input.
///
/// These are contract violations by the caller, so they are surfaced
/// immediately instead of degrading to "no filter".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CriteriaError {
    /// A date bound is not a calendar date.
    #[error("invalid {field} date: \"{value}\" (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Which bound was rejected (`start` or `end`).
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A recent-window length is negative.
    #[error("invalid recent window: {0} days (must be zero or positive)")]
    NegativeWindow(i64),

    /// A tab name is not one of the three buckets.
    #[error("unknown tab \"{0}\" (expected open, recently_closed, or historical)")]
    UnknownTab(String),
}

/// Errors while normalizing a raw case-store record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// A field required to build a swap case is absent or blank.
    #[error("case {record}: missing required field `{field}`")]
    MissingField {
        /// Case identifier, or `<unknown>` when the id itself is missing.
        record: String,
        /// Name of the absent field in the case-store schema.
        field: &'static str,
    },

    /// An identifier field is present but not a valid identifier.
    #[error("case {record}: {source}")]
    Identifier {
        /// Case identifier.
        record: String,
        /// The underlying validation failure.
        source: ValidationError,
    },

    /// A list element does not have the shape of a record.
    #[error("record #{index}: {reason}")]
    Malformed {
        /// Zero-based position of the element in its list.
        index: usize,
        /// Decoder message.
        reason: String,
    },
}

impl NormalizationError {
    pub(crate) fn malformed(index: usize, err: serde_json::Error) -> Self {
        Self::Malformed {
            index,
            reason: err.to_string(),
        }
    }
}

/// Errors from the swap request wizard.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The target pilot was chosen before the requesting pilot.
    #[error("the requesting pilot must be selected before the target pilot")]
    TargetBeforeRequester,

    /// A pilot slot is still empty when leaving the pilot step.
    #[error("no {0} pilot selected")]
    MissingPilot(&'static str),

    /// Requesting and target pilot are the same person.
    #[error("a pilot cannot swap with themselves (pilot {0})")]
    SamePilot(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_error_wraps_criteria_error() {
        let err = CoreError::from(CriteriaError::InvalidDate {
            field: "start",
            value: "tomorrow".to_string(),
        });
        let msg = format!("{err}");
        assert!(msg.contains("invalid filter criteria"));
        assert!(msg.contains("tomorrow"));
    }

    #[test]
    fn core_error_wraps_validation_error() {
        let err = CoreError::from(ValidationError::EmptyPilotId);
        assert!(format!("{err}").contains("pilot ID"));
    }

    #[test]
    fn criteria_error_negative_window() {
        let err = CriteriaError::NegativeWindow(-3);
        assert!(format!("{err}").contains("-3"));
    }

    #[test]
    fn criteria_error_unknown_tab() {
        let err = CriteriaError::UnknownTab("archive".to_string());
        let msg = format!("{err}");
        assert!(msg.contains("archive"));
        assert!(msg.contains("recently_closed"));
    }

    #[test]
    fn normalization_error_names_record_and_field() {
        let err = NormalizationError::MissingField {
            record: "case-7".to_string(),
            field: "created_at",
        };
        let msg = format!("{err}");
        assert!(msg.contains("case-7"));
        assert!(msg.contains("created_at"));
    }

    #[test]
    fn normalization_error_identifier_display() {
        let err = NormalizationError::Identifier {
            record: "case-9".to_string(),
            source: ValidationError::EmptyPilotId,
        };
        assert!(format!("{err}").contains("case-9"));
    }

    #[test]
    fn normalization_error_malformed_display() {
        let err = NormalizationError::Malformed {
            index: 4,
            reason: "invalid type: map".to_string(),
        };
        assert_eq!(format!("{err}"), "record #4: invalid type: map");
    }

    #[test]
    fn request_error_same_pilot() {
        let err = RequestError::SamePilot("12345".to_string());
        assert!(format!("{err}").contains("12345"));
    }

    #[test]
    fn request_error_missing_pilot() {
        let err = RequestError::MissingPilot("target");
        assert_eq!(format!("{err}"), "no target pilot selected");
    }
}
