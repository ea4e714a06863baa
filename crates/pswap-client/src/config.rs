//! Case-store client configuration.
//!
//! One base URL serves the pilot directory, the flight schedule, and the
//! case endpoints. Defaults point to a local case store. Override via
//! environment variables or explicit construction for staging/testing.

use url::Url;

/// Default case-store base URL.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for connecting to the case store.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct SwapApiConfig {
    /// Base URL of the case store.
    pub base_url: Url,
    /// Optional bearer token. The case store may run unauthenticated.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SwapApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwapApiConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SwapApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SWAP_API_URL` (default: `http://127.0.0.1:8000`)
    /// - `SWAP_API_TOKEN` (optional)
    /// - `SWAP_API_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match std::env::var("SWAP_API_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            base_url: env_url("SWAP_API_URL", DEFAULT_BASE_URL)?,
            api_token: std::env::var("SWAP_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs,
        })
    }

    /// Configuration for an explicit base URL, without a token.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` does not parse.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Full URL of a case-store path such as `api/cases`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("SWAP_API_TIMEOUT_SECS must be a whole number of seconds, got \"{0}\"")]
    InvalidTimeout(String),
    #[error("API token contains characters not allowed in a header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_base_url_builds_valid_config() {
        let cfg = SwapApiConfig::for_base_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(cfg.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(cfg.api_token.is_none());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let cfg = SwapApiConfig::for_base_url("http://127.0.0.1:9000/").unwrap();
        assert_eq!(cfg.endpoint("api/cases"), "http://127.0.0.1:9000/api/cases");

        let nested = SwapApiConfig::for_base_url("http://gateway/swap").unwrap();
        assert_eq!(nested.endpoint("api/cases"), "http://gateway/swap/api/cases");
    }

    #[test]
    fn debug_redacts_token() {
        let mut cfg = SwapApiConfig::for_base_url("http://127.0.0.1:9000").unwrap();
        cfg.api_token = Some("s3cret".to_string());
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("s3cret"));
        assert!(dbg.contains("REDACTED"));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("PSWAP_NONEXISTENT_VAR_12345", "https://example.com").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn for_base_url_rejects_invalid_url() {
        assert!(matches!(
            SwapApiConfig::for_base_url("not a url"),
            Err(ConfigError::InvalidUrl(_, _))
        ));
    }
}
