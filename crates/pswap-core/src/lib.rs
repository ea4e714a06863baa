//! # pswap-core: Swap Case Domain for the Pilot Swap Portal
//!
//! This crate holds the decision logic behind the swap case list: which
//! cases match the filter bar, and which tab each case belongs to. Every
//! other crate in the workspace depends on `pswap-core`; it depends on
//! nothing internal and performs no I/O.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `CaseId` and `PilotId` are validated at
//!    construction. A blank id cannot enter the system.
//!
//! 2. **Pure pipeline.** [`filter()`] and [`classify()`] are synchronous
//!    functions of their arguments. The classifier takes `now` explicitly and
//!    never reads the clock, so results are reproducible in tests.
//!
//! 3. **Fail closed on bad data, loudly on bad input.** A malformed case
//!    record is excluded from the buckets and counted as dropped. Malformed
//!    filter criteria are a [`CriteriaError`] returned to the caller.
//!
//! 4. **One ingestion path.** Case-store rows pass through
//!    [`normalize::normalize`] before any filtering happens.
//!
//! 5. **Typestate wizard.** A case-save payload can only be produced from a
//!    `SwapRequest<Confirming>`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pswap-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No logging. Callers decide what to report.

#![deny(missing_docs)]

pub mod case;
pub mod classify;
pub mod directory;
pub mod error;
pub mod filter;
pub mod identity;
pub mod normalize;
pub mod request;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use case::{ApprovalStages, CaseStatus, ClosureOutcome, SwapCase, APPROVAL_STAGE_COUNT};
pub use classify::{
    bucket_of, classify, filter_and_classify, Bucket, BucketCounts, Buckets,
    ClassificationPolicy, DEFAULT_RECENT_WINDOW_DAYS,
};
pub use directory::{FlightRecord, PilotRecord};
pub use error::{
    CoreError, CriteriaError, NormalizationError, RequestError, ValidationError,
};
pub use filter::{filter, FilterCriteria};
pub use identity::{CaseId, PilotId};
pub use normalize::{normalize, normalize_all, normalize_values, RawCaseRecord, Scalar, Snapshot};
pub use request::{CaseSavePayload, SwapRequest};
pub use temporal::Timestamp;

/// Parse a JSON array of [`SwapCase`] records.
///
/// Elements that are not records are reported in [`Snapshot::rejected`].
///
/// # Errors
///
/// Returns [`CoreError::Json`] if the document is not a JSON array.
pub fn parse_snapshot(json: &str) -> Result<Snapshot, CoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(Snapshot::from_case_values(values))
}

/// Parse a JSON array of case-store rows and normalize them.
///
/// Rows that cannot be normalized are reported in [`Snapshot::rejected`].
///
/// # Errors
///
/// Returns [`CoreError::Json`] if the document is not a JSON array.
pub fn parse_raw_snapshot(json: &str) -> Result<Snapshot, CoreError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    Ok(normalize_values(values))
}
