//! # Case List Scenarios
//!
//! Runs the filter and classifier over `fixtures/sample_cases.json`, the
//! ten-case snapshot the portal's list view was first built against.

use chrono::{DateTime, TimeZone, Utc};
use pswap_core::{
    classify, filter, filter_and_classify, parse_snapshot, Bucket, ClassificationPolicy,
    ClosureOutcome, FilterCriteria, SwapCase,
};

const SAMPLE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../fixtures/sample_cases.json"
));

fn sample() -> Vec<SwapCase> {
    let snapshot = parse_snapshot(SAMPLE).expect("fixture should parse");
    assert!(snapshot.rejected.is_empty());
    snapshot.cases
}

fn end_of_april() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 30, 12, 0, 0).unwrap()
}

fn ids(cases: &[&SwapCase]) -> Vec<String> {
    cases.iter().map(|c| c.id.to_string()).collect()
}

#[test]
fn unfiltered_snapshot_splits_into_three_tabs() {
    let cases = sample();
    let buckets = classify(&cases, end_of_april(), &ClassificationPolicy::default());
    assert_eq!(ids(&buckets.open), vec!["1", "4", "6", "9"]);
    assert_eq!(ids(&buckets.recently_closed), vec!["2", "3", "5", "10"]);
    assert_eq!(ids(&buckets.historical), vec!["7", "8"]);
    assert_eq!(buckets.dropped, 0);
}

#[test]
fn route_filter_kin() {
    let cases = sample();
    let criteria = FilterCriteria::parse(Some("KIN"), None, None).unwrap();
    let buckets =
        filter_and_classify(&cases, &criteria, end_of_april(), &ClassificationPolicy::default());
    assert_eq!(ids(&buckets.open), vec!["1"]);
    assert_eq!(ids(&buckets.recently_closed), vec!["2", "3"]);
    assert!(buckets.historical.is_empty());
}

#[test]
fn date_range_filter() {
    let cases = sample();
    let criteria = FilterCriteria::parse(None, Some("2025-04-20"), Some("2025-04-25")).unwrap();
    let kept = filter(&cases, &criteria);
    assert_eq!(ids(&kept), vec!["1", "2", "3", "5"]);
}

#[test]
fn route_and_start_date_combined() {
    let cases = sample();
    let criteria = FilterCriteria::parse(Some("sdq"), Some("2025-04-21"), None).unwrap();
    let kept = filter(&cases, &criteria);
    assert_eq!(ids(&kept), vec!["2", "3"]);
}

#[test]
fn later_clock_ages_cases_into_history() {
    let cases = sample();
    let now = Utc.with_ymd_and_hms(2025, 5, 6, 12, 0, 0).unwrap();
    let buckets = classify(&cases, now, &ClassificationPolicy::default());
    assert_eq!(ids(buckets.get(Bucket::RecentlyClosed)), vec!["5", "10"]);
    assert_eq!(ids(buckets.get(Bucket::Historical)), vec!["2", "3", "7", "8"]);
}

#[test]
fn closure_outcome_follows_approval_stages() {
    let cases = sample();
    let outcome = |id: &str| {
        cases
            .iter()
            .find(|c| c.id.as_str() == id)
            .and_then(SwapCase::closure_outcome)
    };
    assert_eq!(outcome("2"), Some(ClosureOutcome::Approved));
    assert_eq!(outcome("3"), Some(ClosureOutcome::NotApproved));
    assert_eq!(outcome("1"), None);
}
