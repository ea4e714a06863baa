//! # Shared Wire Types
//!
//! Re-exports the case-store wire types from [`pswap_core`] so that
//! consumers of `pswap-client` see the same records the core normalizes.

pub use pswap_core::{
    CaseSavePayload, FlightRecord, PilotId, PilotRecord, RawCaseRecord, Snapshot,
};
