//! # pswap-client -- Typed Rust client for the swap case store
//!
//! Provides typed access to the three resources behind the portal:
//! - **Pilots** via `/api/cases/pilot={id}` (crew directory)
//! - **Flights** via `/api/flights/date={date}` (flight schedule)
//! - **Cases** via `/api/cases` and `/api/cases/cases_save`
//!
//! ## Architecture
//!
//! This crate is the only path from the workspace to the case store. It
//! returns case-store rows undecoded and offers
//! [`cases::CaseClient::snapshot`] to normalize them one by one; filtering
//! and classification stay in `pswap-core`.
//!
//! Transport failures are retried with exponential backoff; the case save
//! is retried only when the connection itself failed. Non-2xx
//! responses surface as [`SwapApiError::ApiError`].

pub mod cases;
pub mod config;
pub mod error;
pub mod flights;
pub mod pilots;
pub(crate) mod retry;
pub mod types;

pub use config::SwapApiConfig;
pub use error::SwapApiError;

use std::time::Duration;

/// Top-level case-store client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct SwapApiClient {
    pilots: pilots::PilotClient,
    flights: flights::FlightClient,
    cases: cases::CaseClient,
}

impl SwapApiClient {
    /// Create a new client from configuration.
    pub fn new(config: SwapApiConfig) -> Result<Self, SwapApiError> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.api_token {
            headers.insert(
                reqwest::header::AUTHORIZATION,
                reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| SwapApiError::Config(config::ConfigError::InvalidToken))?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| SwapApiError::http("client_init", e))?;

        Ok(Self {
            pilots: pilots::PilotClient::new(http.clone(), config.clone()),
            flights: flights::FlightClient::new(http.clone(), config.clone()),
            cases: cases::CaseClient::new(http, config),
        })
    }

    /// Create a client from `SWAP_API_*` environment variables.
    pub fn from_env() -> Result<Self, SwapApiError> {
        Self::new(SwapApiConfig::from_env()?)
    }

    /// Access the crew directory client.
    pub fn pilots(&self) -> &pilots::PilotClient {
        &self.pilots
    }

    /// Access the flight schedule client.
    pub fn flights(&self) -> &flights::FlightClient {
        &self.flights
    }

    /// Access the case client.
    pub fn cases(&self) -> &cases::CaseClient {
        &self.cases
    }
}
