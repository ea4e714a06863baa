//! # Case Classifier
//!
//! Partitions swap cases into the three tabs of the case list:
//!
//! | Bucket | Rule |
//! |--------|------|
//! | [`Bucket::Open`] | `status == open` (any `closedAt` is ignored) |
//! | [`Bucket::RecentlyClosed`] | closed, valid `closedAt`, elapsed whole days ≤ window |
//! | [`Bucket::Historical`] | closed, valid `closedAt`, elapsed whole days > window |
//!
//! Every other case (closed without a parsable `closedAt`, or a status
//! that is neither `open` nor `closed`) lands in no bucket. It is hidden and
//! never reported as an error. [`Buckets::dropped`] counts such cases.
//!
//! Classification is a pure function of (cases, now, policy). Each bucket is
//! a stable partition of the input order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::case::{CaseStatus, SwapCase};
use crate::error::CriteriaError;
use crate::filter::{filter, FilterCriteria};
use crate::temporal::elapsed_whole_days;

/// Days since closure within which a case still counts as recently closed.
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 30;

/// Tunable classification parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationPolicy {
    /// Inclusive upper bound, in whole days, of the recently-closed window.
    pub recent_window_days: i64,
}

impl ClassificationPolicy {
    /// Create a policy with a custom recent window.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::NegativeWindow`] for a negative window.
    pub fn with_window(recent_window_days: i64) -> Result<Self, CriteriaError> {
        if recent_window_days < 0 {
            return Err(CriteriaError::NegativeWindow(recent_window_days));
        }
        Ok(Self { recent_window_days })
    }
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
        }
    }
}

/// One of the three mutually exclusive display categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Cases still in the approval workflow.
    Open,
    /// Cases closed within the recent window.
    RecentlyClosed,
    /// Cases closed before the recent window.
    Historical,
}

impl Bucket {
    /// All buckets in tab order.
    pub fn all() -> &'static [Bucket] {
        &[Self::Open, Self::RecentlyClosed, Self::Historical]
    }

    /// Return the snake_case name of this bucket.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::RecentlyClosed => "recently_closed",
            Self::Historical => "historical",
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Bucket {
    type Err = CriteriaError;

    /// Accepts the snake_case names plus the tab aliases `closed`,
    /// `recent` and `history`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "recently_closed" | "recent" | "closed" => Ok(Self::RecentlyClosed),
            "historical" | "history" => Ok(Self::Historical),
            _ => Err(CriteriaError::UnknownTab(s.to_string())),
        }
    }
}

/// Decide the bucket of a single case, or `None` if it belongs to no bucket.
pub fn bucket_of(
    case: &SwapCase,
    now: &DateTime<Utc>,
    policy: &ClassificationPolicy,
) -> Option<Bucket> {
    match case.status {
        CaseStatus::Open => Some(Bucket::Open),
        CaseStatus::Closed => {
            let closed = case.closed_instant()?;
            if elapsed_whole_days(now, &closed) <= policy.recent_window_days {
                Some(Bucket::RecentlyClosed)
            } else {
                Some(Bucket::Historical)
            }
        }
        CaseStatus::Unrecognized(_) => None,
    }
}

/// Per-bucket case counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    /// Cases in the open tab.
    pub open: usize,
    /// Cases in the recently-closed tab.
    pub recently_closed: usize,
    /// Cases in the historical tab.
    pub historical: usize,
    /// Cases in no tab.
    pub dropped: usize,
}

/// The result of classification: borrowed views into the input collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets<'a> {
    /// Open cases.
    pub open: Vec<&'a SwapCase>,
    /// Cases closed within the window.
    pub recently_closed: Vec<&'a SwapCase>,
    /// Cases closed before the window.
    pub historical: Vec<&'a SwapCase>,
    /// Cases that matched no bucket.
    pub dropped: usize,
}

impl<'a> Buckets<'a> {
    /// The cases of one bucket, in input order.
    pub fn get(&self, bucket: Bucket) -> &[&'a SwapCase] {
        match bucket {
            Bucket::Open => &self.open,
            Bucket::RecentlyClosed => &self.recently_closed,
            Bucket::Historical => &self.historical,
        }
    }

    /// Total number of classified cases across all buckets.
    pub fn len(&self) -> usize {
        self.open.len() + self.recently_closed.len() + self.historical.len()
    }

    /// Whether every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-bucket counts, including dropped cases.
    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            open: self.open.len(),
            recently_closed: self.recently_closed.len(),
            historical: self.historical.len(),
            dropped: self.dropped,
        }
    }
}

/// Partition `cases` into the three buckets relative to `now`.
pub fn classify<'a, I>(cases: I, now: DateTime<Utc>, policy: &ClassificationPolicy) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a SwapCase>,
{
    let mut buckets = Buckets::default();
    for case in cases {
        match bucket_of(case, &now, policy) {
            Some(Bucket::Open) => buckets.open.push(case),
            Some(Bucket::RecentlyClosed) => buckets.recently_closed.push(case),
            Some(Bucket::Historical) => buckets.historical.push(case),
            None => buckets.dropped += 1,
        }
    }
    buckets
}

/// Filter, then classify: the full case-list pipeline.
pub fn filter_and_classify<'a, I>(
    cases: I,
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
    policy: &ClassificationPolicy,
) -> Buckets<'a>
where
    I: IntoIterator<Item = &'a SwapCase>,
{
    classify(filter(cases, criteria), now, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::ApprovalStages;
    use crate::identity::{CaseId, PilotId};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap()
    }

    fn case(id: &str, status: CaseStatus, closed_at: Option<String>) -> SwapCase {
        SwapCase {
            id: CaseId::new(id).unwrap(),
            pilot_requester_id: PilotId::new("12345").unwrap(),
            pilot_swap_id: PilotId::new("67890").unwrap(),
            flight_number: "AA123".to_string(),
            flight_date: "2025-04-20".to_string(),
            route_iata: "SDQ-KIN-SDQ".to_string(),
            approval_stages: ApprovalStages::new([true, false, false]),
            created_at: "2025-04-15T10:00:00Z".to_string(),
            closed_at,
            status,
        }
    }

    fn closed_days_ago(id: &str, days: i64) -> SwapCase {
        let at = now() - Duration::days(days);
        case(id, CaseStatus::Closed, Some(at.to_rfc3339()))
    }

    #[test]
    fn open_case_lands_only_in_open() {
        let cases = vec![case("a", CaseStatus::Open, None)];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.open.len(), 1);
        assert!(b.recently_closed.is_empty());
        assert!(b.historical.is_empty());
    }

    #[test]
    fn open_case_ignores_stray_closed_at() {
        let stray = (now() - Duration::days(400)).to_rfc3339();
        let cases = vec![case("a", CaseStatus::Open, Some(stray))];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.counts().open, 1);
        assert_eq!(b.counts().historical, 0);
    }

    #[test]
    fn closed_five_days_ago_is_recent() {
        let cases = vec![closed_days_ago("b", 5)];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.recently_closed.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn closed_four_hundred_days_ago_is_historical() {
        let cases = vec![closed_days_ago("c", 400)];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.historical.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn exactly_thirty_days_is_still_recent() {
        let cases = vec![closed_days_ago("d", 30), closed_days_ago("e", 31)];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.recently_closed[0].id.as_str(), "d");
        assert_eq!(b.historical[0].id.as_str(), "e");
    }

    #[test]
    fn thirty_and_a_half_days_truncates_to_thirty() {
        let at = now() - Duration::hours(30 * 24 + 12);
        let cases = vec![case("f", CaseStatus::Closed, Some(at.to_rfc3339()))];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.recently_closed.len(), 1);
    }

    #[test]
    fn closed_without_closed_at_is_dropped() {
        let cases = vec![
            case("g", CaseStatus::Closed, None),
            case("h", CaseStatus::Closed, Some("not a date".to_string())),
        ];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert!(b.is_empty());
        assert_eq!(b.dropped, 2);
    }

    #[test]
    fn unrecognized_status_is_dropped() {
        let cases = vec![closed_days_ago("i", 1)];
        let mut odd = cases[0].clone();
        odd.status = CaseStatus::Unrecognized("pending".to_string());
        let b = classify(std::iter::once(&odd), now(), &ClassificationPolicy::default());
        assert!(b.is_empty());
        assert_eq!(b.dropped, 1);
    }

    #[test]
    fn future_closure_counts_as_recent() {
        let at = now() + Duration::days(3);
        let cases = vec![case("j", CaseStatus::Closed, Some(at.to_rfc3339()))];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        assert_eq!(b.recently_closed.len(), 1);
    }

    #[test]
    fn custom_window_moves_boundary() {
        let cases = vec![closed_days_ago("k", 8)];
        let week = ClassificationPolicy::with_window(7).unwrap();
        let b = classify(&cases, now(), &week);
        assert_eq!(b.historical.len(), 1);
    }

    #[test]
    fn negative_window_is_rejected() {
        assert_eq!(
            ClassificationPolicy::with_window(-1),
            Err(CriteriaError::NegativeWindow(-1))
        );
    }

    #[test]
    fn buckets_preserve_input_order() {
        let cases = vec![
            closed_days_ago("3", 2),
            case("1", CaseStatus::Open, None),
            closed_days_ago("2", 1),
            case("0", CaseStatus::Open, None),
        ];
        let b = classify(&cases, now(), &ClassificationPolicy::default());
        let open: Vec<_> = b.get(Bucket::Open).iter().map(|c| c.id.as_str()).collect();
        let recent: Vec<_> = b
            .get(Bucket::RecentlyClosed)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(open, vec!["1", "0"]);
        assert_eq!(recent, vec!["3", "2"]);
    }

    #[test]
    fn filter_and_classify_applies_route_first() {
        let mut other_route = closed_days_ago("m", 3);
        other_route.route_iata = "NYC-LAX-NYC".to_string();
        let cases = vec![closed_days_ago("l", 3), other_route];
        let criteria = FilterCriteria::parse(Some("kin"), None, None).unwrap();
        let b = filter_and_classify(&cases, &criteria, now(), &ClassificationPolicy::default());
        assert_eq!(b.recently_closed.len(), 1);
        assert_eq!(b.recently_closed[0].id.as_str(), "l");
    }

    #[test]
    fn bucket_parses_tab_aliases() {
        assert_eq!("open".parse::<Bucket>().unwrap(), Bucket::Open);
        assert_eq!("closed".parse::<Bucket>().unwrap(), Bucket::RecentlyClosed);
        assert_eq!("Recently_Closed".parse::<Bucket>().unwrap(), Bucket::RecentlyClosed);
        assert_eq!("history".parse::<Bucket>().unwrap(), Bucket::Historical);
        assert!(matches!(
            "archive".parse::<Bucket>(),
            Err(CriteriaError::UnknownTab(_))
        ));
    }
}
