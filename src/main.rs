use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{Router, routing::get, response::Html};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

use pv_yield_estimator::api_docs::ApiDoc;
use pv_yield_estimator::config::Config;
use pv_yield_estimator::routes::yield_routes::api_routes;
use pv_yield_estimator::services::catalog::{ComponentCatalog, SapmThermalCatalog, StaticCatalog};
use pv_yield_estimator::services::plot::JsonSeriesWriter;
use pv_yield_estimator::services::weather_service::PvgisClient;
use pv_yield_estimator::shared_state::AppState;
use pv_yield_estimator::YieldEstimator;

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. Load configuration
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        warn!("{} not found, using defaults", CONFIG_PATH);
        Config::default()
    };
    info!("PVGIS endpoint: {} (timeout {}s)", config.pvgis.base_url, config.pvgis.timeout_secs);

    // 2. Wire collaborators
    let catalog: Arc<dyn ComponentCatalog> = match &config.catalog_path {
        Some(path) => Arc::new(StaticCatalog::from_json_file(path)?),
        None => Arc::new(StaticCatalog::builtin()),
    };
    let pvgis = PvgisClient::new(config.pvgis.base_url.clone(), config.pvgis.timeout())
        .context("building PVGIS client")?;
    let weather = Arc::new(pvgis);
    let mut estimator = YieldEstimator::new(catalog, Arc::new(SapmThermalCatalog), weather);
    if let Some(path) = &config.plot.output_path {
        info!("AC series plotting enabled → {}", path);
        estimator = estimator.with_plotter(Arc::new(JsonSeriesWriter::new(path)));
    }

    // Fail at startup rather than on the first request
    estimator.components()?;
    let state = AppState::new(estimator);

    // 3. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(state))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    axum_server::bind(addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
