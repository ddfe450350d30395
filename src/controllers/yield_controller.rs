use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::warn;

use crate::error::{WeatherError, YieldError};
use crate::models::estimate::{ErrorResponse, HealthStatus, YieldQuery, YieldResponse};
use crate::shared_state::AppState;

/// HTTP status for a failed estimate.
pub fn status_for(err: &YieldError) -> StatusCode {
    match err {
        YieldError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        YieldError::Weather(WeatherError::Rejected { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        YieldError::Weather(WeatherError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
        YieldError::Weather(_) => StatusCode::BAD_GATEWAY,
        YieldError::SolarPosition(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

/// GET /api/yield
/// Estimate the annual AC energy yield at a site
///
/// Fetches the typical meteorological year for the coordinates and returns the
/// estimated yearly energy of one fixed, south-facing module tilted at the latitude.
#[utoipa::path(
    get,
    path = "/api/yield",
    params(YieldQuery),
    responses(
        (status = 200, description = "Annual energy estimate", body = YieldResponse),
        (status = 422, description = "Coordinates rejected", body = ErrorResponse),
        (status = 502, description = "Weather service unavailable", body = ErrorResponse),
        (status = 504, description = "Weather service timed out", body = ErrorResponse)
    )
)]
pub async fn get_yield(
    Query(q): Query<YieldQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.estimator.estimate_breakdown(q.latitude, q.longitude).await {
        Ok(b) => {
            let response = YieldResponse {
                latitude: q.latitude,
                longitude: q.longitude,
                surface_tilt: b.orientation.tilt_deg,
                surface_azimuth: b.orientation.azimuth_deg,
                elevation_m: b.elevation_m,
                annual_energy_kwh: b.annual_energy_kwh,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Estimate for ({}, {}) failed: {}", q.latitude, q.longitude, e);
            let body = ErrorResponse { error: e.to_string() };
            (status_for(&e), Json(body)).into_response()
        }
    }
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    )
)]
pub async fn get_health() -> impl IntoResponse {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
