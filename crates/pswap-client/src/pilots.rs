//! Typed client for the crew directory.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/cases/pilot={id}` | Look up one pilot |

use pswap_core::{PilotId, PilotRecord};

use crate::config::SwapApiConfig;
use crate::error::SwapApiError;

/// Client for pilot lookups.
#[derive(Debug, Clone)]
pub struct PilotClient {
    http: reqwest::Client,
    config: SwapApiConfig,
}

impl PilotClient {
    pub(crate) fn new(http: reqwest::Client, config: SwapApiConfig) -> Self {
        Self { http, config }
    }

    /// Look up a pilot by id. Returns `None` when the directory has no
    /// such pilot.
    ///
    /// Calls `GET {base_url}/api/cases/pilot={id}`.
    pub async fn get(&self, id: &PilotId) -> Result<Option<PilotRecord>, SwapApiError> {
        let endpoint = format!("GET /api/cases/pilot={id}");
        let url = self.config.endpoint(&format!("api/cases/pilot={id}"));

        let resp = crate::retry::retry_send(&endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| SwapApiError::http(&endpoint, e))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(pilot = %id, "pilot not found in directory");
            return Ok(None);
        }

        let resp = SwapApiError::check(&endpoint, resp).await?;
        resp.json()
            .await
            .map(Some)
            .map_err(|e| SwapApiError::deserialization(&endpoint, e))
    }
}
