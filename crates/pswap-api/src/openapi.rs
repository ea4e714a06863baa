//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the portal API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pilot Swap Portal API",
        version = "0.1.0",
        description = "Backend for the pilot swap portal: filtered and classified case lists, crew directory and flight schedule lookups, and swap request submission."
    ),
    paths(
        crate::routes::cases::list_cases,
        crate::routes::directory::get_pilot,
        crate::routes::directory::list_flights,
        crate::routes::requests::create_swap_request,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::cases::CaseListResponse,
        crate::routes::cases::CaseView,
        crate::routes::cases::ClosureView,
        crate::routes::cases::CountsView,
        crate::routes::requests::CreateSwapRequest,
    )),
    tags(
        (name = "cases", description = "Case list with filter bar and tabs"),
        (name = "directory", description = "Crew directory and flight schedule"),
        (name = "swap_requests", description = "Swap request submission"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
