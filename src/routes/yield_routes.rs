use axum::{routing::get, Router};

use crate::controllers::yield_controller::{get_health, get_yield};
use crate::shared_state::AppState;

/// Build the `/api/*` sub-router.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/yield",  get(get_yield))
        .route("/health", get(get_health))
        .with_state(state)
}
