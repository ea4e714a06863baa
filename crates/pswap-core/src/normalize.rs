//! # Case-Store Normalization
//!
//! The case store speaks its own row shape: snake_case columns, a numeric
//! status flag, separate departure/arrival airports, and a split carrier code
//! and flight number. [`normalize`] maps one such row onto a [`SwapCase`].
//!
//! Mapping rules:
//!
//! - status flag `"0"` (string or number) means open, with no closure instant;
//!   any other flag, or none, means closed, closed at `updated_at`.
//! - route is `"{departure_airport}-{arrival_airport}"`.
//! - flight number is carrier code plus number; the code defaults to `DM`.
//! - approval stages are padded with `false` up to three.
//!
//! A row that cannot be mapped (no id, no pilots, no creation instant) is
//! reported as a [`NormalizationError`]. [`normalize_all`] collects those
//! per-row failures next to the cases that did map.
//!
//! Lists arriving over the wire are read as loose JSON values first and
//! converted element by element ([`normalize_values`],
//! [`Snapshot::from_case_values`]), so one row of the wrong shape is
//! rejected on its own and the rest of the list survives.

use serde::{Deserialize, Serialize};

use crate::case::{ApprovalStages, CaseStatus, SwapCase};
use crate::error::NormalizationError;
use crate::identity::{CaseId, PilotId};

/// Status flag the case store writes for a newly opened case.
pub const OPEN_STATUS_FLAG: &str = "0";

/// Carrier code assumed when a row carries none.
pub const DEFAULT_CARRIER_CODE: &str = "DM";

const UNKNOWN_RECORD: &str = "<unknown>";

/// A JSON scalar whose type the case store does not keep consistent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// An integral number.
    Int(i64),
    /// Any other number, e.g. `2.0` or a value beyond `i64`.
    Number(serde_json::Number),
    /// A boolean flag.
    Bool(bool),
    /// A string.
    Text(String),
}

impl Scalar {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Whether the value is numerically zero or the text `"0"`.
    fn is_zero(&self) -> bool {
        match self {
            Self::Int(n) => *n == 0,
            Self::Number(n) => n.as_f64() == Some(0.0),
            Self::Bool(_) => false,
            Self::Text(s) => s.trim() == OPEN_STATUS_FLAG,
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            // `123.0` renders as `123` so designators stay readable.
            Self::Number(n) => match n.as_f64() {
                Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{}", v as i64),
                _ => write!(f, "{n}"),
            },
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

/// One row of the case store, as returned by `GET /api/cases`.
///
/// Every field is optional at the serde level so that one incomplete row
/// surfaces as a [`NormalizationError`] instead of failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCaseRecord {
    /// Case identifier; older rows call the column `id`.
    #[serde(alias = "id")]
    pub request_id: Option<Scalar>,
    /// AIMS id of the pilot giving up the duty.
    pub requesting_pilot_id: Option<Scalar>,
    /// Display name of the requesting pilot.
    pub requesting_pilot_name: Option<String>,
    /// Rank code of the requesting pilot.
    pub requesting_pilot_position: Option<String>,
    /// Email of the requesting pilot; stands in for a missing id.
    pub requesting_pilot_email: Option<String>,
    /// AIMS id of the pilot taking over the duty.
    pub target_pilot_id: Option<Scalar>,
    /// Display name of the target pilot.
    pub target_pilot_name: Option<String>,
    /// Rank code of the target pilot.
    pub target_pilot_position: Option<String>,
    /// Email of the target pilot; stands in for a missing id.
    pub target_pilot_email: Option<String>,
    /// Carrier code, `DM` when absent.
    pub flight_code: Option<String>,
    /// Flight number without carrier code.
    pub flight_number: Option<Scalar>,
    /// Departure airport IATA code.
    pub departure_airport: Option<String>,
    /// Arrival airport IATA code.
    pub arrival_airport: Option<String>,
    /// Operating date of the flight.
    pub flight_date: Option<String>,
    /// Creation instant.
    pub created_at: Option<String>,
    /// Last update; the closure instant of a closed case.
    pub updated_at: Option<String>,
    /// Status flag: `"0"` or `0` is open, anything else closed.
    pub status: Option<Scalar>,
    /// Approval checkpoints, possibly fewer than three.
    pub approval_stages: Option<Vec<bool>>,
}

impl RawCaseRecord {
    /// Whether the status flag marks the case as open.
    pub fn is_open(&self) -> bool {
        self.status.as_ref().is_some_and(Scalar::is_zero)
    }

    fn label(&self) -> String {
        self.request_id
            .as_ref()
            .filter(|id| !id.is_blank())
            .map(|id| id.to_string())
            .unwrap_or_else(|| UNKNOWN_RECORD.to_string())
    }

    fn route(&self) -> String {
        let dep = non_blank(self.departure_airport.as_deref());
        let arr = non_blank(self.arrival_airport.as_deref());
        match (dep, arr) {
            (None, None) => String::new(),
            (dep, arr) => format!("{}-{}", dep.unwrap_or_default(), arr.unwrap_or_default()),
        }
    }

    fn designator(&self) -> String {
        let Some(number) = self.flight_number.as_ref().filter(|n| !n.is_blank()) else {
            return String::new();
        };
        let code = non_blank(self.flight_code.as_deref()).unwrap_or(DEFAULT_CARRIER_CODE);
        format!("{code}{number}")
    }

    /// Resolve a pilot identifier from the id column, falling back to email.
    fn pilot(
        record: &str,
        id: Option<&Scalar>,
        email: Option<&str>,
        field: &'static str,
    ) -> Result<PilotId, NormalizationError> {
        let raw = id
            .filter(|v| !v.is_blank())
            .map(|v| v.to_string())
            .or_else(|| non_blank(email).map(str::to_string))
            .ok_or_else(|| NormalizationError::MissingField {
                record: record.to_string(),
                field,
            })?;
        PilotId::new(raw).map_err(|source| NormalizationError::Identifier {
            record: record.to_string(),
            source,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Map one case-store row onto a [`SwapCase`].
///
/// # Errors
///
/// Returns [`NormalizationError::MissingField`] when the id, either pilot,
/// or the creation instant is absent.
pub fn normalize(raw: &RawCaseRecord) -> Result<SwapCase, NormalizationError> {
    let record = raw.label();
    let id = raw
        .request_id
        .as_ref()
        .filter(|id| !id.is_blank())
        .ok_or_else(|| NormalizationError::MissingField {
            record: record.clone(),
            field: "request_id",
        })
        .and_then(|id| {
            CaseId::new(id.to_string()).map_err(|source| NormalizationError::Identifier {
                record: record.clone(),
                source,
            })
        })?;

    let pilot_requester_id = RawCaseRecord::pilot(
        &record,
        raw.requesting_pilot_id.as_ref(),
        raw.requesting_pilot_email.as_deref(),
        "requesting_pilot_id",
    )?;
    let pilot_swap_id = RawCaseRecord::pilot(
        &record,
        raw.target_pilot_id.as_ref(),
        raw.target_pilot_email.as_deref(),
        "target_pilot_id",
    )?;

    let created_at = non_blank(raw.created_at.as_deref())
        .ok_or_else(|| NormalizationError::MissingField {
            record: record.clone(),
            field: "created_at",
        })?
        .to_string();

    let (status, closed_at) = if raw.is_open() {
        (CaseStatus::Open, None)
    } else {
        (
            CaseStatus::Closed,
            non_blank(raw.updated_at.as_deref()).map(str::to_string),
        )
    };

    Ok(SwapCase {
        id,
        pilot_requester_id,
        pilot_swap_id,
        flight_number: raw.designator(),
        flight_date: raw.flight_date.as_deref().unwrap_or_default().trim().to_string(),
        route_iata: raw.route(),
        approval_stages: ApprovalStages::from_partial(
            raw.approval_stages.as_deref().unwrap_or_default(),
        ),
        created_at,
        closed_at,
        status,
    })
}

impl TryFrom<&RawCaseRecord> for SwapCase {
    type Error = NormalizationError;

    fn try_from(raw: &RawCaseRecord) -> Result<Self, Self::Error> {
        normalize(raw)
    }
}

/// A normalized case collection plus the rows that could not be mapped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Cases in input order.
    pub cases: Vec<SwapCase>,
    /// One entry per input element that did not become a case.
    pub rejected: Vec<NormalizationError>,
}

impl Snapshot {
    /// A snapshot of already-normalized cases.
    pub fn from_cases(cases: Vec<SwapCase>) -> Self {
        Self {
            cases,
            rejected: Vec::new(),
        }
    }

    /// Read portal-shaped case records one element at a time.
    ///
    /// An element that is not a record reports
    /// [`NormalizationError::Malformed`]; the others keep their order.
    pub fn from_case_values(values: Vec<serde_json::Value>) -> Self {
        let mut snapshot = Self::default();
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<SwapCase>(value) {
                Ok(case) => snapshot.cases.push(case),
                Err(e) => snapshot.rejected.push(NormalizationError::malformed(index, e)),
            }
        }
        snapshot
    }
}

/// Normalize every row, keeping input order among the mapped cases.
pub fn normalize_all<'a, I>(records: I) -> Snapshot
where
    I: IntoIterator<Item = &'a RawCaseRecord>,
{
    let mut snapshot = Snapshot::default();
    for raw in records {
        match normalize(raw) {
            Ok(case) => snapshot.cases.push(case),
            Err(e) => snapshot.rejected.push(e),
        }
    }
    snapshot
}

/// Decode and normalize case-store rows given as loose JSON values.
///
/// A row whose columns have the wrong shape is rejected like any other row
/// that cannot be normalized.
pub fn normalize_values(values: Vec<serde_json::Value>) -> Snapshot {
    let mut snapshot = Snapshot::default();
    for (index, value) in values.into_iter().enumerate() {
        let case = serde_json::from_value::<RawCaseRecord>(value)
            .map_err(|e| NormalizationError::malformed(index, e))
            .and_then(|raw| normalize(&raw));
        match case {
            Ok(case) => snapshot.cases.push(case),
            Err(e) => snapshot.rejected.push(e),
        }
    }
    snapshot
}
