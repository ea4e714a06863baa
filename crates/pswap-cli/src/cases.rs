//! # Cases Subcommand
//!
//! Runs the case-list pipeline from the command line. The snapshot comes
//! from a file (JSON or YAML, portal shape or case-store shape with
//! `--raw`) or, with `--remote`, straight from the case store.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use clap::Args;

use pswap_core::temporal::parse_instant;
use pswap_core::{
    filter_and_classify, normalize_values, Bucket, Buckets, ClassificationPolicy, FilterCriteria,
    Snapshot, SwapCase, DEFAULT_RECENT_WINDOW_DAYS,
};

use crate::OutputFormat;

/// Arguments for the `pswap cases` subcommand.
#[derive(Args, Debug)]
pub struct CasesArgs {
    /// Snapshot file (`.json`, `.yaml` or `.yml`).
    #[arg(long, value_name = "FILE", required_unless_present = "remote")]
    pub snapshot: Option<PathBuf>,

    /// The snapshot holds case-store rows rather than portal cases.
    #[arg(long)]
    pub raw: bool,

    /// Fetch the snapshot from the case store (`SWAP_API_URL`).
    #[arg(long, conflicts_with_all = ["snapshot", "raw"])]
    pub remote: bool,

    /// Case-insensitive route substring.
    #[arg(long)]
    pub route: Option<String>,

    /// Earliest flight date kept (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub from: Option<String>,

    /// Latest flight date kept (inclusive).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub to: Option<String>,

    /// Show a single tab: open, recently_closed or historical.
    #[arg(long)]
    pub tab: Option<String>,

    /// Evaluation instant. Defaults to the system clock.
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<String>,

    /// Recently-closed window in days.
    #[arg(long, default_value_t = DEFAULT_RECENT_WINDOW_DAYS)]
    pub window_days: i64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Execute the cases subcommand.
pub fn run_cases(args: &CasesArgs) -> Result<u8> {
    let criteria = FilterCriteria::parse(
        args.route.as_deref(),
        args.from.as_deref(),
        args.to.as_deref(),
    )?;
    let policy = ClassificationPolicy::with_window(args.window_days)?;
    let tab = parse_tab(args.tab.as_deref())?;
    let now = match args.now.as_deref() {
        Some(raw) => match parse_instant(raw) {
            Some(now) => now,
            None => bail!("invalid --now: \"{raw}\" (expected RFC 3339)"),
        },
        None => Utc::now(),
    };

    let snapshot = if args.remote {
        let client = crate::client_from_env()?;
        crate::block_on(client.cases().snapshot())?.context("failed to fetch case list")?
    } else {
        let path = args
            .snapshot
            .as_deref()
            .context("--snapshot is required without --remote")?;
        load_snapshot(path, args.raw)?
    };

    for rejected in &snapshot.rejected {
        tracing::warn!("skipped case-store row: {rejected}");
    }

    let buckets = filter_and_classify(snapshot.cases.iter(), &criteria, now, &policy);
    tracing::info!(
        total = snapshot.cases.len(),
        kept = buckets.len(),
        dropped = buckets.dropped,
        "classified snapshot"
    );

    let output = match args.format {
        OutputFormat::Table => render_table(&buckets, tab),
        OutputFormat::Json => render_json(&buckets, tab, now, &policy)?,
    };
    println!("{output}");
    Ok(0)
}

/// A blank `--tab` selects every tab.
fn parse_tab(raw: Option<&str>) -> Result<Option<Bucket>> {
    Ok(raw
        .filter(|t| !t.trim().is_empty())
        .map(str::parse::<Bucket>)
        .transpose()?)
}

/// Read a snapshot file. The format follows the file extension; anything
/// other than `.yaml`/`.yml` is read as JSON. Elements that are not records
/// are reported in [`Snapshot::rejected`].
pub fn load_snapshot(path: &Path, raw: bool) -> Result<Snapshot> {
    if !path.exists() {
        bail!("file not found: {}", path.display());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    let yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );

    let values: Vec<serde_json::Value> = parse_document(&content, yaml)
        .with_context(|| format!("failed to parse snapshot: {}", path.display()))?;
    if raw {
        Ok(normalize_values(values))
    } else {
        Ok(Snapshot::from_case_values(values))
    }
}

fn parse_document<T: serde::de::DeserializeOwned>(content: &str, yaml: bool) -> Result<T> {
    if yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

fn shown(tab: Option<Bucket>) -> Vec<Bucket> {
    match tab {
        Some(tab) => vec![tab],
        None => Bucket::all().to_vec(),
    }
}

fn heading(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Open => "OPEN",
        Bucket::RecentlyClosed => "RECENTLY CLOSED",
        Bucket::Historical => "HISTORICAL",
    }
}

/// One line per case, grouped under a heading per tab.
pub fn render_table(buckets: &Buckets<'_>, tab: Option<Bucket>) -> String {
    let mut out = String::new();
    for bucket in shown(tab) {
        let cases = buckets.get(bucket);
        out.push_str(&format!("{} ({})\n", heading(bucket), cases.len()));
        for case in cases {
            out.push_str(&format!(
                "  {:<8} {:<14} {:<12} {:<8} {}\n",
                case.id.as_str(),
                case.route_iata,
                case.flight_date,
                case.flight_number,
                detail(case)
            ));
        }
    }
    if buckets.dropped > 0 {
        out.push_str(&format!("dropped: {}\n", buckets.dropped));
    }
    out.trim_end().to_string()
}

fn detail(case: &SwapCase) -> String {
    match (case.closure_outcome(), case.closed_at.as_deref()) {
        (Some(outcome), Some(closed_at)) => format!("closed {closed_at} ({})", outcome.label()),
        _ => format!(
            "approvals {}/{}",
            case.approval_stages.approved_count(),
            pswap_core::APPROVAL_STAGE_COUNT
        ),
    }
}

/// JSON document with the selected tabs and the counts of all three.
pub fn render_json(
    buckets: &Buckets<'_>,
    tab: Option<Bucket>,
    now: DateTime<Utc>,
    policy: &ClassificationPolicy,
) -> Result<String> {
    let mut doc = serde_json::Map::new();
    doc.insert(
        "evaluated_at".into(),
        now.to_rfc3339_opts(SecondsFormat::Secs, true).into(),
    );
    doc.insert("window_days".into(), policy.recent_window_days.into());
    for bucket in shown(tab) {
        doc.insert(
            bucket.as_str().into(),
            serde_json::to_value(buckets.get(bucket))?,
        );
    }
    doc.insert("counts".into(), serde_json::to_value(buckets.counts())?);
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CASES_JSON: &str = r#"[
        {"id": "1", "pilotRequesterId": "12345", "pilotSwapId": "67890",
         "flightNumber": "AA123", "flightDate": "2025-04-20", "routeIATA": "SDQ-KIN-SDQ",
         "approvalStages": [true, false, false], "createdAt": "2025-04-15T10:00:00Z",
         "status": "open"},
        {"id": "2", "pilotRequesterId": "54321", "pilotSwapId": "09876",
         "flightNumber": "BB456", "flightDate": "2025-04-21", "routeIATA": "KIN-SDQ-KIN",
         "approvalStages": [true, true, true], "createdAt": "2025-03-20T09:00:00Z",
         "closedAt": "2025-04-05T12:00:00Z", "status": "closed"},
        {"id": "7", "pilotRequesterId": "77777", "pilotSwapId": "88888",
         "flightNumber": "GG707", "flightDate": "2025-03-15", "routeIATA": "LON-PAR-LON",
         "approvalStages": [true, true, true], "createdAt": "2022-03-10T08:00:00Z",
         "closedAt": "2022-03-16T14:00:00Z", "status": "closed"}
    ]"#;

    const CASES_YAML: &str = r#"
- id: "1"
  pilotRequesterId: "12345"
  pilotSwapId: "67890"
  flightNumber: AA123
  flightDate: "2025-04-20"
  routeIATA: SDQ-KIN-SDQ
  approvalStages: [true, false, false]
  createdAt: "2025-04-15T10:00:00Z"
  status: open
"#;

    const RAW_JSON: &str = r#"[
        {"request_id": "a1", "requesting_pilot_id": 12345, "target_pilot_id": 67890,
         "flight_number": 123, "departure_airport": "SDQ", "arrival_airport": "KIN",
         "flight_date": "2025-04-20", "created_at": "2025-04-15T10:00:00Z", "status": "0"},
        {"requesting_pilot_id": 1}
    ]"#;

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    fn now() -> DateTime<Utc> {
        parse_instant("2025-04-30T12:00:00Z").unwrap()
    }

    #[test]
    fn load_json_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cases.json", CASES_JSON);
        let snapshot = load_snapshot(&path, false).unwrap();
        assert_eq!(snapshot.cases.len(), 3);
        assert!(snapshot.rejected.is_empty());
    }

    #[test]
    fn load_yaml_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cases.yaml", CASES_YAML);
        let snapshot = load_snapshot(&path, false).unwrap();
        assert_eq!(snapshot.cases.len(), 1);
        assert!(snapshot.cases[0].is_open());
    }

    #[test]
    fn load_raw_snapshot_reports_rejects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rows.json", RAW_JSON);
        let snapshot = load_snapshot(&path, true).unwrap();
        assert_eq!(snapshot.cases.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        assert_eq!(snapshot.cases[0].route_iata, "SDQ-KIN");
    }

    #[test]
    fn odd_records_do_not_fail_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let rows = r#"[
            {"request_id": "a1", "requesting_pilot_id": 1, "target_pilot_id": 2,
             "created_at": "2025-04-15T10:00:00Z", "status": true},
            {"request_id": "a2", "requesting_pilot_id": 1, "target_pilot_id": 2,
             "created_at": "2025-04-15T10:00:00Z", "status": ["0"]}
        ]"#;
        let path = write_file(&dir, "rows.json", rows);
        let snapshot = load_snapshot(&path, true).unwrap();
        assert_eq!(snapshot.cases.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);
        assert!(!snapshot.cases[0].is_open());

        let cases = r#"[{"id": "9", "status": "open"}, 17]"#;
        let path = write_file(&dir, "cases.json", cases);
        let snapshot = load_snapshot(&path, false).unwrap();
        assert!(snapshot.cases.is_empty());
        assert_eq!(snapshot.rejected.len(), 2);
    }

    #[test]
    fn blank_tab_selects_every_tab() {
        assert_eq!(parse_tab(Some("  ")).unwrap(), None);
        assert_eq!(parse_tab(None).unwrap(), None);
        assert_eq!(parse_tab(Some("recent")).unwrap(), Some(Bucket::RecentlyClosed));
        assert!(parse_tab(Some("archived")).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.json"), false).unwrap_err();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "broken.json", "{ not json");
        let err = load_snapshot(&path, false).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn table_groups_cases_by_tab() {
        let snapshot = pswap_core::parse_snapshot(CASES_JSON).unwrap();
        let buckets = filter_and_classify(
            snapshot.cases.iter(),
            &FilterCriteria::default(),
            now(),
            &ClassificationPolicy::default(),
        );
        let table = render_table(&buckets, None);
        assert!(table.contains("OPEN (1)"));
        assert!(table.contains("RECENTLY CLOSED (1)"));
        assert!(table.contains("HISTORICAL (1)"));
        assert!(table.contains("approvals 1/3"));
        assert!(table.contains("Closed and approved"));

        let only_open = render_table(&buckets, Some(Bucket::Open));
        assert!(!only_open.contains("HISTORICAL"));
    }

    #[test]
    fn json_output_keeps_all_counts() {
        let cases = pswap_core::parse_snapshot(CASES_JSON).unwrap().cases;
        let criteria = FilterCriteria::parse(Some("kin"), None, None).unwrap();
        let policy = ClassificationPolicy::default();
        let buckets = filter_and_classify(cases.iter(), &criteria, now(), &policy);

        let json = render_json(&buckets, Some(Bucket::RecentlyClosed), now(), &policy).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(doc.get("open").is_none());
        assert_eq!(doc["recently_closed"][0]["id"], "2");
        assert_eq!(doc["counts"]["open"], 1);
        assert_eq!(doc["counts"]["historical"], 0);
        assert_eq!(doc["evaluated_at"], "2025-04-30T12:00:00Z");
    }

    #[test]
    fn run_cases_rejects_bad_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cases.json", CASES_JSON);
        let args = CasesArgs {
            snapshot: Some(path),
            raw: false,
            remote: false,
            route: None,
            from: None,
            to: None,
            tab: Some("archived".to_string()),
            now: None,
            window_days: DEFAULT_RECENT_WINDOW_DAYS,
            format: OutputFormat::Table,
        };
        assert!(run_cases(&args).is_err());
    }

    #[test]
    fn run_cases_succeeds_on_valid_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "cases.json", CASES_JSON);
        let args = CasesArgs {
            snapshot: Some(path),
            raw: false,
            remote: false,
            route: Some("sdq".to_string()),
            from: Some("2025-04-01".to_string()),
            to: None,
            tab: None,
            now: Some("2025-04-30T12:00:00Z".to_string()),
            window_days: 30,
            format: OutputFormat::Json,
        };
        assert_eq!(run_cases(&args).unwrap(), 0);
    }
}
