//! # Crew Directory and Flight Schedule
//!
//! Read-only lookups proxied to the case store. Both routes need the
//! case-store client and answer 503 without it.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use pswap_core::temporal::parse_calendar_date;
use pswap_core::PilotId;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::routes::require_client;
use crate::state::AppState;

/// Query parameters of the flight lookup.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlightQuery {
    /// Operating date, `YYYY-MM-DD`.
    pub date: String,
}

/// Build the directory router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/pilots/{id}", get(get_pilot))
        .route("/v1/flights", get(list_flights))
}

/// GET /v1/pilots/{id}: Look up a pilot by crew-scheduling id.
#[utoipa::path(
    get,
    path = "/v1/pilots/{id}",
    params(("id" = String, Path, description = "Crew-scheduling (AIMS) pilot id")),
    responses(
        (status = 200, description = "Pilot found"),
        (status = 404, description = "Pilot not found", body = crate::error::ErrorBody),
        (status = 502, description = "Case store error", body = crate::error::ErrorBody),
        (status = 503, description = "Case store not configured", body = crate::error::ErrorBody),
    ),
    tag = "directory"
)]
async fn get_pilot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let pilot_id = PilotId::new(id)?;
    let client = require_client(&state)?;

    match client.pilots().get(&pilot_id).await? {
        Some(pilot) => serde_json::to_value(pilot)
            .map(Json)
            .map_err(|e| AppError::Internal(format!("serialization error: {e}"))),
        None => Err(AppError::NotFound(format!("pilot {pilot_id} not found"))),
    }
}

/// GET /v1/flights: Flights operating on a date.
#[utoipa::path(
    get,
    path = "/v1/flights",
    params(FlightQuery),
    responses(
        (status = 200, description = "Flights on the date; empty when none operate"),
        (status = 400, description = "Invalid date", body = crate::error::ErrorBody),
        (status = 502, description = "Case store error", body = crate::error::ErrorBody),
        (status = 503, description = "Case store not configured", body = crate::error::ErrorBody),
    ),
    tag = "directory"
)]
async fn list_flights(
    State(state): State<AppState>,
    query: Result<Query<FlightQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let query = extract_query(query)?;
    let date = parse_calendar_date(&query.date).ok_or_else(|| {
        AppError::BadRequest(format!("invalid date: \"{}\" (expected YYYY-MM-DD)", query.date))
    })?;
    let client = require_client(&state)?;

    let flights = client.flights().on_date(date).await?;
    serde_json::to_value(flights)
        .map(Json)
        .map_err(|e| AppError::Internal(format!("serialization error: {e}")))
}
