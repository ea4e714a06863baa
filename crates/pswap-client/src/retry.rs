//! Retry with exponential backoff for case-store HTTP calls.
//!
//! Only transport failures are retried. Any HTTP response, including
//! 4xx/5xx, is handed back to the caller on the first attempt.
//!
//! Reads use [`retry_send`], which retries every transport failure including
//! timeouts. Writes use [`retry_connect`], which retries only failures to
//! connect: a timed-out write may already have been applied upstream.

use std::time::Duration;

/// Retries after the initial request.
const MAX_RETRIES: u32 = 3;

/// First backoff delay; doubles each attempt: 200ms, 400ms, 800ms.
const BASE_DELAY_MS: u64 = 200;

/// Send a request, retrying transport errors with exponential backoff.
///
/// `send` is called up to `MAX_RETRIES + 1` times.
pub(crate) async fn retry_send<F, Fut>(
    endpoint: &str,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    retry_when(endpoint, send, |_| true).await
}

/// Send a non-idempotent request, retrying only connection failures.
pub(crate) async fn retry_connect<F, Fut>(
    endpoint: &str,
    send: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    retry_when(endpoint, send, reqwest::Error::is_connect).await
}

async fn retry_when<F, Fut>(
    endpoint: &str,
    send: F,
    retryable: fn(&reqwest::Error) -> bool,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
{
    let mut attempt = 0;
    loop {
        match send().await {
            Ok(resp) => return Ok(resp),
            Err(e) if attempt < MAX_RETRIES && retryable(&e) => {
                let delay = backoff(attempt);
                attempt += 1;
                tracing::warn!(
                    endpoint,
                    attempt,
                    max_retries = MAX_RETRIES,
                    "case store request failed, retrying in {delay:?}: {e}"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt))
}
