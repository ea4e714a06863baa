//! # Case List
//!
//! `GET /v1/cases` runs the full pipeline over the current snapshot:
//! filter by route and flight-date range, then split the survivors into
//! the open, recently-closed and historical tabs.
//!
//! Each case view carries the display fields of its tab. Open cases show
//! approval progress. Closed cases show the closure date and whether every
//! stage approved.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, SecondsFormat, Utc};
use pswap_core::temporal::parse_instant;
use pswap_core::{
    filter_and_classify, Bucket, BucketCounts, Buckets, ClassificationPolicy, FilterCriteria,
    SwapCase,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::state::AppState;

/// Query parameters of the case list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CaseQuery {
    /// Case-insensitive route substring.
    pub route: Option<String>,
    /// Earliest flight date kept, `YYYY-MM-DD`.
    pub from: Option<String>,
    /// Latest flight date kept, `YYYY-MM-DD`.
    pub to: Option<String>,
    /// Return a single tab: `open`, `recently_closed` or `historical`.
    pub tab: Option<String>,
    /// Recently-closed window in days. Defaults to the server setting.
    pub window_days: Option<i64>,
    /// Evaluation instant (RFC 3339). Defaults to the server clock.
    pub now: Option<String>,
}

/// Closure details of a closed case.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClosureView {
    pub closed_at: String,
    /// `approved` or `not_approved`.
    pub outcome: String,
    pub label: String,
}

/// One case as shown in a tab.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaseView {
    pub id: String,
    pub pilot_requester_id: String,
    pub pilot_swap_id: String,
    pub flight_number: String,
    pub flight_date: String,
    pub route_iata: String,
    pub created_at: String,
    pub status: String,
    pub approval_stages: Vec<bool>,
    /// Number of stages signed off so far.
    pub approved_stages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closure: Option<ClosureView>,
}

impl From<&SwapCase> for CaseView {
    fn from(case: &SwapCase) -> Self {
        let closure = match (case.closure_outcome(), &case.closed_at) {
            (Some(outcome), Some(closed_at)) => Some(ClosureView {
                closed_at: closed_at.clone(),
                outcome: match outcome {
                    pswap_core::ClosureOutcome::Approved => "approved",
                    pswap_core::ClosureOutcome::NotApproved => "not_approved",
                }
                .to_string(),
                label: outcome.label().to_string(),
            }),
            _ => None,
        };
        Self {
            id: case.id.to_string(),
            pilot_requester_id: case.pilot_requester_id.to_string(),
            pilot_swap_id: case.pilot_swap_id.to_string(),
            flight_number: case.flight_number.clone(),
            flight_date: case.flight_date.clone(),
            route_iata: case.route_iata.clone(),
            created_at: case.created_at.clone(),
            status: case.status.as_str().to_string(),
            approval_stages: case.approval_stages.as_slice().to_vec(),
            approved_stages: case.approval_stages.approved_count(),
            closure,
        }
    }
}

/// Per-tab counts after filtering.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountsView {
    pub open: usize,
    pub recently_closed: usize,
    pub historical: usize,
    /// Filtered cases that belong to no tab.
    pub dropped: usize,
}

impl From<BucketCounts> for CountsView {
    fn from(counts: BucketCounts) -> Self {
        Self {
            open: counts.open,
            recently_closed: counts.recently_closed,
            historical: counts.historical,
            dropped: counts.dropped,
        }
    }
}

/// Case list response.
///
/// With `tab` set, only that tab's list is present. Counts always cover
/// all three tabs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CaseListResponse {
    /// The instant the classification was evaluated at.
    pub evaluated_at: String,
    pub window_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Vec<CaseView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recently_closed: Option<Vec<CaseView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub historical: Option<Vec<CaseView>>,
    pub counts: CountsView,
    /// Case-store rows that could not be normalized.
    pub rejected: usize,
}

/// Build the case router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/cases", get(list_cases))
}

/// GET /v1/cases: Filter and classify the case snapshot.
#[utoipa::path(
    get,
    path = "/v1/cases",
    params(CaseQuery),
    responses(
        (status = 200, description = "Classified case list", body = CaseListResponse),
        (status = 400, description = "Invalid filter criteria", body = crate::error::ErrorBody),
        (status = 502, description = "Case store error", body = crate::error::ErrorBody),
    ),
    tag = "cases"
)]
async fn list_cases(
    State(state): State<AppState>,
    query: Result<Query<CaseQuery>, QueryRejection>,
) -> Result<Json<CaseListResponse>, AppError> {
    let query = extract_query(query)?;

    let criteria = FilterCriteria::parse(
        query.route.as_deref(),
        query.from.as_deref(),
        query.to.as_deref(),
    )?;
    let policy = match query.window_days {
        Some(days) => ClassificationPolicy::with_window(days)?,
        None => state.config.policy(),
    };
    let tab = query
        .tab
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<Bucket>)
        .transpose()?;
    let now = evaluation_instant(query.now.as_deref())?;

    let (cases, rejected) = load_cases(&state).await?;
    let buckets = filter_and_classify(cases.iter(), &criteria, now, &policy);

    tracing::debug!(
        total = cases.len(),
        kept = buckets.len(),
        dropped = buckets.dropped,
        "case list evaluated"
    );

    Ok(Json(build_response(&buckets, tab, now, &policy, rejected)))
}

fn evaluation_instant(raw: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        Some(raw) => parse_instant(raw)
            .ok_or_else(|| AppError::BadRequest(format!("invalid now: \"{raw}\" (expected RFC 3339)"))),
        None => Ok(Utc::now()),
    }
}

/// The current snapshot and the number of rows rejected while building it.
async fn load_cases(state: &AppState) -> Result<(Arc<Vec<SwapCase>>, usize), AppError> {
    match state.client.as_ref() {
        Some(client) => {
            let snapshot = client.cases().snapshot().await?;
            Ok((Arc::new(snapshot.cases), snapshot.rejected.len()))
        }
        None => Ok((state.cases.snapshot(), 0)),
    }
}

fn build_response(
    buckets: &Buckets<'_>,
    tab: Option<Bucket>,
    now: DateTime<Utc>,
    policy: &ClassificationPolicy,
    rejected: usize,
) -> CaseListResponse {
    let view = |bucket: Bucket| -> Option<Vec<CaseView>> {
        if tab.is_some_and(|t| t != bucket) {
            return None;
        }
        Some(buckets.get(bucket).iter().map(|c| CaseView::from(*c)).collect())
    };
    CaseListResponse {
        evaluated_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        window_days: policy.recent_window_days,
        open: view(Bucket::Open),
        recently_closed: view(Bucket::RecentlyClosed),
        historical: view(Bucket::Historical),
        counts: buckets.counts().into(),
        rejected,
    }
}
