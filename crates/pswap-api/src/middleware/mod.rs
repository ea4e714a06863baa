//! # Middleware
//!
//! Request counters and request tracing for the portal API.

pub mod metrics;
pub mod tracing_layer;
