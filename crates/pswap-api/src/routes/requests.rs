//! # Swap Request Submission
//!
//! `POST /v1/swap-requests` drives the request wizard server-side: both
//! pilots are looked up in the crew directory, the flight is matched in the
//! day's schedule, and the confirmed request is saved to the case store as
//! a new open case.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use pswap_core::normalize::DEFAULT_CARRIER_CODE;
use pswap_core::temporal::parse_calendar_date;
use pswap_core::{FlightRecord, PilotId, PilotRecord, SwapRequest, Timestamp};
use pswap_client::SwapApiClient;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::routes::require_client;
use crate::state::AppState;

/// Swap request submission.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSwapRequest {
    /// Pilot giving up the duty.
    pub requesting_pilot_id: String,
    /// Pilot taking over the duty.
    pub target_pilot_id: String,
    /// Operating date of the flight, `YYYY-MM-DD`.
    pub flight_date: String,
    /// Flight number, with or without the carrier code (`123` or `DM123`).
    pub flight_number: String,
}

impl Validate for CreateSwapRequest {
    fn validate(&self) -> Result<(), String> {
        if self.requesting_pilot_id.trim().is_empty() || self.target_pilot_id.trim().is_empty() {
            return Err("requesting_pilot_id and target_pilot_id must not be empty".to_string());
        }
        if self.flight_number.trim().is_empty() {
            return Err("flight_number must not be empty".to_string());
        }
        if parse_calendar_date(&self.flight_date).is_none() {
            return Err(format!(
                "flight_date \"{}\" is not a calendar date (expected YYYY-MM-DD)",
                self.flight_date
            ));
        }
        Ok(())
    }
}

/// Build the swap request router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/swap-requests", post(create_swap_request))
}

/// POST /v1/swap-requests: Submit a swap request.
#[utoipa::path(
    post,
    path = "/v1/swap-requests",
    request_body = CreateSwapRequest,
    responses(
        (status = 201, description = "Request saved; body is the case-save payload"),
        (status = 404, description = "Pilot or flight not found", body = crate::error::ErrorBody),
        (status = 422, description = "Invalid request", body = crate::error::ErrorBody),
        (status = 502, description = "Case store error", body = crate::error::ErrorBody),
        (status = 503, description = "Case store not configured", body = crate::error::ErrorBody),
    ),
    tag = "swap_requests"
)]
async fn create_swap_request(
    State(state): State<AppState>,
    body: Result<Json<CreateSwapRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let req = extract_validated_json(body)?;
    let client = require_client(&state)?;

    let requester = lookup_pilot(client, &req.requesting_pilot_id).await?;
    let target = lookup_pilot(client, &req.target_pilot_id).await?;
    let flight = lookup_flight(client, &req.flight_date, &req.flight_number).await?;

    let payload = SwapRequest::new()
        .with_requester(requester)
        .with_target(target)?
        .confirm_pilots()?
        .select_flight(flight)
        .into_payload(Uuid::new_v4(), &Timestamp::now());

    client.cases().save(&payload).await?;
    tracing::info!(
        request_id = %payload.request_id,
        requesting_pilot = %payload.requesting_pilot_id,
        target_pilot = %payload.target_pilot_id,
        "swap request saved"
    );

    let value = serde_json::to_value(&payload)
        .map_err(|e| AppError::Internal(format!("serialization error: {e}")))?;
    Ok((StatusCode::CREATED, Json(value)))
}

async fn lookup_pilot(client: &SwapApiClient, raw_id: &str) -> Result<PilotRecord, AppError> {
    let id = PilotId::new(raw_id.trim())?;
    client
        .pilots()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("pilot {id} not found")))
}

async fn lookup_flight(
    client: &SwapApiClient,
    flight_date: &str,
    flight_number: &str,
) -> Result<FlightRecord, AppError> {
    let date = parse_calendar_date(flight_date).ok_or_else(|| {
        AppError::Validation(format!("flight_date \"{flight_date}\" is not a calendar date"))
    })?;
    let flights = client.flights().on_date(date).await?;
    find_flight(flights, flight_number).ok_or_else(|| {
        AppError::NotFound(format!("flight {flight_number} not found on {flight_date}"))
    })
}

/// Match by bare number or by full designator, ignoring case.
fn find_flight(flights: Vec<FlightRecord>, wanted: &str) -> Option<FlightRecord> {
    let wanted = wanted.trim();
    flights.into_iter().find(|f| {
        f.number.to_string().eq_ignore_ascii_case(wanted)
            || f.designator(DEFAULT_CARRIER_CODE).eq_ignore_ascii_case(wanted)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flight(number: serde_json::Value) -> FlightRecord {
        serde_json::from_value(serde_json::json!({
            "Flt": number, "date": "2025-04-20", "Dep": "SDQ", "Arr": "KIN"
        }))
        .unwrap()
    }

    fn request(date: &str) -> CreateSwapRequest {
        CreateSwapRequest {
            requesting_pilot_id: "12345".to_string(),
            target_pilot_id: "67890".to_string(),
            flight_date: date.to_string(),
            flight_number: "DM123".to_string(),
        }
    }

    #[test]
    fn find_flight_accepts_number_or_designator() {
        let flights = vec![flight(serde_json::json!(456)), flight(serde_json::json!(123))];
        assert!(find_flight(flights.clone(), "123").is_some());
        assert!(find_flight(flights.clone(), "dm123").is_some());
        assert!(find_flight(flights, "DM999").is_none());
    }

    #[test]
    fn validate_rejects_bad_flight_date() {
        assert!(request("2025-04-20").validate().is_ok());
        assert!(request("20/04/2025").validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_pilot() {
        let mut req = request("2025-04-20");
        req.target_pilot_id = "  ".to_string();
        assert!(req.validate().is_err());
    }
}
