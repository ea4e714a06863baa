//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Case Source
//!
//! The case list is read from one of two places:
//! - **Case store** when a [`SwapApiClient`] is configured. Every request
//!   fetches a fresh snapshot.
//! - **In-memory snapshot** otherwise, seeded from the `CASES_FIXTURE` JSON
//!   file at startup. Handlers clone the snapshot under a read lock and
//!   release the lock before doing any work.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use pswap_client::SwapApiClient;
use pswap_core::{
    ClassificationPolicy, CoreError, CriteriaError, Snapshot, SwapCase, DEFAULT_RECENT_WINDOW_DAYS,
};

// -- In-Memory Case Snapshot ---------------------------------------------------

/// Thread-safe, cloneable in-memory case snapshot.
///
/// The lock is `parking_lot` and is never held across `.await` points.
#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    cases: Arc<RwLock<Arc<Vec<SwapCase>>>>,
}

impl CaseStore {
    /// Create a store holding `cases`.
    pub fn new(cases: Vec<SwapCase>) -> Self {
        Self {
            cases: Arc::new(RwLock::new(Arc::new(cases))),
        }
    }

    /// The current snapshot. Cheap: only the `Arc` is cloned.
    pub fn snapshot(&self) -> Arc<Vec<SwapCase>> {
        Arc::clone(&self.cases.read())
    }

    /// Replace the whole snapshot.
    pub fn replace(&self, cases: Vec<SwapCase>) {
        *self.cases.write() = Arc::new(cases);
    }

    /// Number of cases in the current snapshot.
    pub fn len(&self) -> usize {
        self.cases.read().len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -- Configuration -------------------------------------------------------------

/// Application configuration.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    /// Default recently-closed window, in days.
    pub recent_window_days: i64,
    /// JSON file seeding the in-memory case snapshot.
    pub cases_fixture: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("recent_window_days", &self.recent_window_days)
            .field("cases_fixture", &self.cases_fixture)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            auth_token: None,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            cases_fixture: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `PORT` (default: 8080)
    /// - `AUTH_TOKEN` (optional)
    /// - `RECENT_WINDOW_DAYS` (default: 30)
    /// - `CASES_FIXTURE` (optional path)
    pub fn from_env() -> Result<Self, StateError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| StateError::InvalidVar("PORT", raw))?,
            Err(_) => 8080,
        };
        let recent_window_days = match std::env::var("RECENT_WINDOW_DAYS") {
            Ok(raw) => {
                let days: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| StateError::InvalidVar("RECENT_WINDOW_DAYS", raw.clone()))?;
                ClassificationPolicy::with_window(days)?.recent_window_days
            }
            Err(_) => DEFAULT_RECENT_WINDOW_DAYS,
        };
        Ok(Self {
            port,
            auth_token: std::env::var("AUTH_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            recent_window_days,
            cases_fixture: std::env::var_os("CASES_FIXTURE").map(PathBuf::from),
        })
    }

    /// The classification policy implied by this configuration.
    pub fn policy(&self) -> ClassificationPolicy {
        ClassificationPolicy {
            recent_window_days: self.recent_window_days,
        }
    }
}

/// Errors while building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid value for {0}: \"{1}\"")]
    InvalidVar(&'static str, String),
    #[error(transparent)]
    Window(#[from] CriteriaError),
    #[error("failed to read case fixture {path}: {source}")]
    FixtureIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid case fixture {path}: {source}")]
    Fixture { path: PathBuf, source: CoreError },
}

/// Load a JSON array of swap cases from disk.
///
/// Elements that are not case records come back in [`Snapshot::rejected`].
pub fn load_fixture(path: &Path) -> Result<Snapshot, StateError> {
    let json = std::fs::read_to_string(path).map_err(|source| StateError::FixtureIo {
        path: path.to_path_buf(),
        source,
    })?;
    pswap_core::parse_snapshot(&json).map_err(|source| StateError::Fixture {
        path: path.to_path_buf(),
        source,
    })
}

// -- Application State ---------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// In-memory snapshot, used when no case store is configured.
    pub cases: CaseStore,
    /// Case-store client. `None` means offline mode: directory routes
    /// return 503 and the case list comes from [`AppState::cases`].
    pub client: Option<SwapApiClient>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Default configuration, empty snapshot, no case store.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None, Vec::new())
    }

    /// Build state from its parts.
    pub fn with_config(
        config: AppConfig,
        client: Option<SwapApiClient>,
        cases: Vec<SwapCase>,
    ) -> Self {
        Self {
            config,
            cases: CaseStore::new(cases),
            client,
        }
    }

    /// Build state from configuration, loading the fixture if one is set.
    pub fn bootstrap(config: AppConfig, client: Option<SwapApiClient>) -> Result<Self, StateError> {
        let cases = match &config.cases_fixture {
            Some(path) => {
                let snapshot = load_fixture(path)?;
                for rejected in &snapshot.rejected {
                    tracing::warn!(path = %path.display(), error = %rejected, "skipping fixture record");
                }
                tracing::info!(
                    path = %path.display(),
                    cases = snapshot.cases.len(),
                    rejected = snapshot.rejected.len(),
                    "loaded case fixture"
                );
                snapshot.cases
            }
            None => Vec::new(),
        };
        Ok(Self::with_config(config, client, cases))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ONE_CASE: &str = r#"[{
        "id": "1", "pilotRequesterId": "12345", "pilotSwapId": "67890",
        "flightNumber": "AA123", "flightDate": "2025-04-20", "routeIATA": "SDQ-KIN-SDQ",
        "approvalStages": [true, false, false], "createdAt": "2025-04-15T10:00:00Z",
        "status": "open"
    }]"#;

    #[test]
    fn case_store_replace_is_visible_to_clones() {
        let store = CaseStore::default();
        let other = store.clone();
        assert!(other.is_empty());
        store.replace(pswap_core::parse_snapshot(ONE_CASE).unwrap().cases);
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn snapshot_outlives_replace() {
        let store = CaseStore::new(pswap_core::parse_snapshot(ONE_CASE).unwrap().cases);
        let held = store.snapshot();
        store.replace(Vec::new());
        assert_eq!(held.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn bootstrap_loads_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONE_CASE.as_bytes()).unwrap();
        let config = AppConfig {
            cases_fixture: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let state = AppState::bootstrap(config, None).unwrap();
        assert_eq!(state.cases.len(), 1);
    }

    #[test]
    fn fixture_with_bad_record_keeps_the_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"[
                {"id": "1", "pilotRequesterId": "12345", "pilotSwapId": "67890",
                 "flightNumber": "DM123", "flightDate": "2025-04-20", "routeIATA": "SDQ-KIN",
                 "approvalStages": [true, false, false], "createdAt": "2025-04-15T10:00:00Z",
                 "closedAt": 1712318400000, "status": null},
                {"id": "2", "approvalStages": [true]}
            ]"#,
        )
        .unwrap();
        let snapshot = load_fixture(file.path()).unwrap();
        assert_eq!(snapshot.cases.len(), 1);
        assert_eq!(snapshot.rejected.len(), 1);

        let config = AppConfig {
            cases_fixture: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        assert_eq!(AppState::bootstrap(config, None).unwrap().cases.len(), 1);
    }

    #[test]
    fn bootstrap_rejects_malformed_fixture() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"not\": \"a list\"}").unwrap();
        let config = AppConfig {
            cases_fixture: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        assert!(matches!(
            AppState::bootstrap(config, None),
            Err(StateError::Fixture { .. })
        ));
    }

    #[test]
    fn missing_fixture_is_io_error() {
        assert!(matches!(
            load_fixture(Path::new("/nonexistent/pswap/cases.json")),
            Err(StateError::FixtureIo { .. })
        ));
    }

    #[test]
    fn debug_redacts_auth_token() {
        let config = AppConfig {
            auth_token: Some("crew-secret".to_string()),
            ..AppConfig::default()
        };
        assert!(!format!("{config:?}").contains("crew-secret"));
    }
}
