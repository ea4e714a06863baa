//! # pswap-cli: CLI Tool for the Pilot Swap Portal
//!
//! Provides the `pswap` command-line interface for operators who need the
//! case list without the portal, and for checking what the case store
//! holds.
//!
//! ## Subcommands
//!
//! - `pswap cases`: Filter and classify a case snapshot.
//! - `pswap pilot`: Look up a pilot in the crew directory.
//! - `pswap flights`: List the flights operating on a date.
//!
//! ```bash
//! pswap cases --snapshot fixtures/sample_cases.json --route kin --now 2025-04-30T12:00:00Z
//! pswap cases --remote --tab open --format json
//! pswap flights 2025-04-20
//! ```

pub mod cases;
pub mod lookup;

use std::future::Future;

use anyhow::{Context, Result};
use pswap_client::SwapApiClient;

/// Output format shared by every subcommand.
#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns for a terminal.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}

/// Run a case-store call to completion on a single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}

/// Case-store client configured from `SWAP_API_*` environment variables.
pub fn client_from_env() -> Result<SwapApiClient> {
    SwapApiClient::from_env().context("case store client not configured (see SWAP_API_URL)")
}
