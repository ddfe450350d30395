use utoipa::OpenApi;
use crate::controllers::yield_controller;
use crate::models::estimate;

#[derive(OpenApi)]
#[openapi(
    paths(
        yield_controller::get_yield,
        yield_controller::get_health
    ),
    components(
        schemas(
            estimate::YieldResponse,
            estimate::HealthStatus,
            estimate::ErrorResponse
        )
    ),
    tags(
        (name = "pv-yield-estimator", description = "Annual PV energy yield API")
    )
)]
pub struct ApiDoc;
