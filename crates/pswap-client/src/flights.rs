//! Typed client for the flight schedule.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/flights/date={YYYY-MM-DD}` | Flights operating on a date |
//!
//! The schedule answers with a bare object when exactly one flight operates
//! that day and with an array otherwise. Both shapes decode to a list.

use chrono::NaiveDate;
use pswap_core::FlightRecord;
use serde::Deserialize;

use crate::config::SwapApiConfig;
use crate::error::SwapApiError;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<FlightRecord>),
    One(Box<FlightRecord>),
}

impl From<OneOrMany> for Vec<FlightRecord> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::Many(flights) => flights,
            OneOrMany::One(flight) => vec![*flight],
        }
    }
}

/// Client for flight schedule lookups.
#[derive(Debug, Clone)]
pub struct FlightClient {
    http: reqwest::Client,
    config: SwapApiConfig,
}

impl FlightClient {
    pub(crate) fn new(http: reqwest::Client, config: SwapApiConfig) -> Self {
        Self { http, config }
    }

    /// List the flights operating on `date`. A 404 means no flights.
    ///
    /// Calls `GET {base_url}/api/flights/date={date}`.
    pub async fn on_date(&self, date: NaiveDate) -> Result<Vec<FlightRecord>, SwapApiError> {
        let day = date.format("%Y-%m-%d");
        let endpoint = format!("GET /api/flights/date={day}");
        let url = self.config.endpoint(&format!("api/flights/date={day}"));

        let resp = crate::retry::retry_send(&endpoint, || self.http.get(&url).send())
            .await
            .map_err(|e| SwapApiError::http(&endpoint, e))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let resp = SwapApiError::check(&endpoint, resp).await?;
        let flights: OneOrMany = resp
            .json()
            .await
            .map_err(|e| SwapApiError::deserialization(&endpoint, e))?;
        Ok(flights.into())
    }
}
