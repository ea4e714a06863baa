//! # API Route Modules
//!
//! - `cases`: The case list, with filter bar and tab classification over the
//!   current snapshot.
//! - `directory`: Crew directory and flight schedule lookups, proxied to
//!   the case store.
//! - `requests`: Swap request submission through the request wizard.

pub mod cases;
pub mod directory;
pub mod requests;

use pswap_client::SwapApiClient;

use crate::error::AppError;
use crate::state::AppState;

/// Helper: the case-store client, or 503 if it is not configured.
pub(crate) fn require_client(state: &AppState) -> Result<&SwapApiClient, AppError> {
    state.client.as_ref().ok_or_else(|| {
        AppError::service_unavailable(
            "case store not configured. Set SWAP_API_URL environment variable.",
        )
    })
}
