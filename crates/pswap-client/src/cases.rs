//! Typed client for the case endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/cases` | List every case row |
//! | POST   | `/api/cases/cases_save` | Save a new swap request |

use pswap_core::{normalize_values, CaseSavePayload, Snapshot};

use crate::config::SwapApiConfig;
use crate::error::SwapApiError;

/// Client for case listing and case creation.
#[derive(Debug, Clone)]
pub struct CaseClient {
    http: reqwest::Client,
    config: SwapApiConfig,
}

impl CaseClient {
    pub(crate) fn new(http: reqwest::Client, config: SwapApiConfig) -> Self {
        Self { http, config }
    }

    /// Fetch every case row as the case store stores it.
    ///
    /// Calls `GET {base_url}/api/cases`. Rows are left undecoded so that one
    /// row of the wrong shape cannot fail the whole list; [`Self::snapshot`]
    /// decodes them one by one.
    pub async fn list(&self) -> Result<Vec<serde_json::Value>, SwapApiError> {
        let endpoint = "GET /api/cases";
        let url = self.config.endpoint("api/cases");

        let resp = crate::retry::retry_send(endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| SwapApiError::http(endpoint, e))?;
        let resp = SwapApiError::check(endpoint, resp).await?;

        resp.json()
            .await
            .map_err(|e| SwapApiError::deserialization(endpoint, e))
    }

    /// Fetch and normalize every case.
    ///
    /// Rows that fail normalization are logged and returned in
    /// [`Snapshot::rejected`]; they never fail the call.
    pub async fn snapshot(&self) -> Result<Snapshot, SwapApiError> {
        let rows = self.list().await?;
        let snapshot = normalize_values(rows);
        for rejected in &snapshot.rejected {
            tracing::warn!(error = %rejected, "skipping case row that cannot be normalized");
        }
        tracing::debug!(
            cases = snapshot.cases.len(),
            rejected = snapshot.rejected.len(),
            "fetched case snapshot"
        );
        Ok(snapshot)
    }

    /// Save a new swap request.
    ///
    /// Calls `POST {base_url}/api/cases/cases_save`. The response body is
    /// not interpreted. Only connection failures are retried; a request that
    /// reached the case store is sent once.
    pub async fn save(&self, payload: &CaseSavePayload) -> Result<(), SwapApiError> {
        let endpoint = "POST /api/cases/cases_save";
        let url = self.config.endpoint("api/cases/cases_save");

        let resp = crate::retry::retry_connect(endpoint, || self.http.post(&url).json(payload).send())
            .await
            .map_err(|e| SwapApiError::http(endpoint, e))?;
        SwapApiError::check(endpoint, resp).await?;

        tracing::info!(request_id = %payload.request_id, "swap request saved");
        Ok(())
    }
}
