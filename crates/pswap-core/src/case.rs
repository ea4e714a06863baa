//! # Swap Case Records
//!
//! The [`SwapCase`] record is the unit the filter engine and the classifier
//! operate on. It is an immutable snapshot of what the case store held at
//! fetch time: this crate never mutates or persists cases.
//!
//! Date-bearing fields stay as the strings the case store sent. They are
//! parsed on demand so that one malformed value degrades that single case
//! (exclusion) instead of rejecting the whole snapshot. For the same reason
//! `status` and `closedAt` accept a value of any JSON type: a status that is
//! not a string becomes [`CaseStatus::Unrecognized`], and a non-string
//! `closedAt` is kept as text that will not parse as an instant.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::identity::{CaseId, PilotId};
use crate::temporal::{parse_calendar_date, parse_instant};

/// Number of sequential sign-off checkpoints in the approval workflow.
pub const APPROVAL_STAGE_COUNT: usize = 3;

/// Lifecycle status of a swap case.
///
/// Only `open` and `closed` are meaningful. Any other value is preserved
/// verbatim in [`CaseStatus::Unrecognized`] so that the classifier can drop
/// the case rather than the whole snapshot failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum CaseStatus {
    /// Still moving through the approval workflow.
    Open,
    /// Resolved, either approved or not.
    Closed,
    /// Any other status string.
    Unrecognized(String),
}

impl CaseStatus {
    /// Return the wire representation of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Unrecognized(other) => other,
        }
    }
}

impl From<String> for CaseStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "open" => Self::Open,
            "closed" => Self::Closed,
            _ => Self::Unrecognized(value),
        }
    }
}

impl From<CaseStatus> for String {
    fn from(status: CaseStatus) -> Self {
        match status {
            CaseStatus::Open => "open".to_string(),
            CaseStatus::Closed => "closed".to_string(),
            CaseStatus::Unrecognized(other) => other,
        }
    }
}

impl<'de> Deserialize<'de> for CaseStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Self::from(s),
            Value::Null => Self::Unrecognized(String::new()),
            other => Self::Unrecognized(other.to_string()),
        })
    }
}

impl Default for CaseStatus {
    /// A record without a status belongs to no tab.
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three ordered approval checkpoints of a swap case.
///
/// Ordering is significant to readers (stage 1 before 2 before 3) but it is
/// not enforced: `[false, true, false]` is representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalStages([bool; APPROVAL_STAGE_COUNT]);

impl ApprovalStages {
    /// Create approval stages from exactly three flags.
    pub fn new(stages: [bool; APPROVAL_STAGE_COUNT]) -> Self {
        Self(stages)
    }

    /// Build stages from a list of any length: missing trailing
    /// stages are unapproved, extra entries are ignored.
    pub fn from_partial(flags: &[bool]) -> Self {
        let mut stages = [false; APPROVAL_STAGE_COUNT];
        for (slot, flag) in stages.iter_mut().zip(flags) {
            *slot = *flag;
        }
        Self(stages)
    }

    /// Access the flags in stage order.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    /// Whether every stage has signed off.
    pub fn all_approved(&self) -> bool {
        self.0.iter().all(|approved| *approved)
    }

    /// Number of stages that have signed off.
    pub fn approved_count(&self) -> usize {
        self.0.iter().filter(|approved| **approved).count()
    }
}

/// Cosmetic label for a closed case: whether every stage approved it.
///
/// Orthogonal to the open/recent/historical split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosureOutcome {
    /// All approval stages signed off.
    Approved,
    /// At least one stage did not sign off.
    NotApproved,
}

impl ClosureOutcome {
    /// Human-readable label shown next to a closed case.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Closed and approved",
            Self::NotApproved => "Closed and not approved",
        }
    }
}

/// A crew swap request as tracked by the case store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapCase {
    /// Case identifier assigned by the case store.
    pub id: CaseId,
    /// Pilot giving up the duty.
    pub pilot_requester_id: PilotId,
    /// Pilot taking over the duty.
    pub pilot_swap_id: PilotId,
    /// Free-form flight designator, e.g. `DM123`.
    pub flight_number: String,
    /// Date of the swapped flight, as sent by the case store.
    pub flight_date: String,
    /// Dash-joined airport codes, e.g. `SDQ-KIN-SDQ`.
    #[serde(rename = "routeIATA")]
    pub route_iata: String,
    /// Approval checkpoints in stage order.
    pub approval_stages: ApprovalStages,
    /// Creation instant, as sent by the case store.
    pub created_at: String,
    /// Closure instant; present iff the case is closed in a well-formed record.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub closed_at: Option<String>,
    /// Lifecycle status.
    #[serde(default)]
    pub status: CaseStatus,
}

/// Any scalar as text; `null` as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl SwapCase {
    /// The flight date as a calendar date, if it parses.
    pub fn flight_day(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.flight_date)
    }

    /// The closure instant, if present and parsable.
    pub fn closed_instant(&self) -> Option<DateTime<Utc>> {
        self.closed_at.as_deref().and_then(parse_instant)
    }

    /// Whether the case is open.
    pub fn is_open(&self) -> bool {
        self.status == CaseStatus::Open
    }

    /// Approval label for closed cases; `None` for every other status.
    pub fn closure_outcome(&self) -> Option<ClosureOutcome> {
        match self.status {
            CaseStatus::Closed if self.approval_stages.all_approved() => {
                Some(ClosureOutcome::Approved)
            }
            CaseStatus::Closed => Some(ClosureOutcome::NotApproved),
            _ => None,
        }
    }
}
