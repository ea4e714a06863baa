//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps errors from pswap-core and pswap-client to HTTP status codes and
//! JSON error bodies. Internal and upstream details are never returned to
//! clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request content violates a business rule (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Query or body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// The case store returned an error or is unreachable (502).
    #[error("upstream case store error: {0}")]
    UpstreamError(String),

    /// The case store is not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
        }
    }

    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::UpstreamError(_) => "The case store could not complete the request".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::UpstreamError(_) => tracing::error!(error = %self, "upstream case store error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<pswap_core::ValidationError> for AppError {
    fn from(err: pswap_core::ValidationError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

/// Filter criteria are caller input: always 400.
impl From<pswap_core::CriteriaError> for AppError {
    fn from(err: pswap_core::CriteriaError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<pswap_core::RequestError> for AppError {
    fn from(err: pswap_core::RequestError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<pswap_client::SwapApiError> for AppError {
    fn from(err: pswap_client::SwapApiError) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn not_found_status_code() {
        let err = AppError::NotFound("pilot 1".to_string());
        assert_eq!(err.status_and_code(), (StatusCode::NOT_FOUND, "NOT_FOUND"));
    }

    #[test]
    fn criteria_error_is_bad_request() {
        let err = AppError::from(pswap_core::CriteriaError::NegativeWindow(-1));
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "BAD_REQUEST"));
    }

    #[test]
    fn request_error_is_validation() {
        let err = AppError::from(pswap_core::RequestError::SamePilot("1".to_string()));
        assert_eq!(
            err.status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
        );
    }

    #[test]
    fn upstream_and_unavailable_codes() {
        assert_eq!(
            AppError::UpstreamError("x".into()).status_and_code(),
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
        );
        assert_eq!(
            AppError::service_unavailable("x").status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
        );
    }

    #[tokio::test]
    async fn internal_error_hides_message() {
        let response = AppError::Internal("db password is hunter2".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("hunter2"));
    }

    #[tokio::test]
    async fn upstream_error_hides_message() {
        let response = AppError::UpstreamError("GET /api/cases returned 500".into()).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert!(!body.error.message.contains("/api/cases"));
    }
}
