//! Case-store client error types.

/// Errors from case-store calls.
#[derive(Debug, thiserror::Error)]
pub enum SwapApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The case store returned a non-2xx status.
    #[error("case store {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl SwapApiError {
    /// Pass a successful response through, or turn a non-2xx response into
    /// [`SwapApiError::ApiError`] carrying the response body.
    pub(crate) async fn check(
        endpoint: &str,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, Self> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(Self::ApiError {
            endpoint: endpoint.to_string(),
            status,
            body,
        })
    }

    pub(crate) fn http(endpoint: &str, source: reqwest::Error) -> Self {
        Self::Http {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(crate) fn deserialization(endpoint: &str, source: reqwest::Error) -> Self {
        Self::Deserialization {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    /// Upstream HTTP status, when the case store answered at all.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
