//! # Request/Response Tracing
//!
//! Configures `tower_http::trace::TraceLayer` for structured request
//! logging with tracing spans.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Span builder used by [`layer`]: method and path, never the query string
/// (filter values may carry pilot identifiers).
#[derive(Debug, Clone, Copy, Default)]
pub struct PathOnlySpan;

impl<B> tower_http::trace::MakeSpan<B> for PathOnlySpan {
    fn make_span(&mut self, request: &Request<B>) -> tracing::Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Build the `TraceLayer` for the portal API.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, PathOnlySpan> {
    TraceLayer::new_for_http()
        .make_span_with(PathOnlySpan)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_http::trace::MakeSpan;

    #[test]
    fn layer_constructs_without_panic() {
        let _layer = layer();
    }

    #[test]
    fn span_is_built_for_request_with_query() {
        let request = Request::builder()
            .uri("/v1/cases?route=SDQ")
            .body(())
            .unwrap();
        let _span = PathOnlySpan.make_span(&request);
    }
}
