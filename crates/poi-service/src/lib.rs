//! Points-of-interest HTTP service.
//!
//! # Endpoints
//!
//! - `GET /api/v1/pois` - List every POI
//! - `POST /api/v1/pois` - Create a POI
//! - `GET /api/v1/pois/search?name=` - Case-insensitive substring search on names
//! - `POST /api/v1/pois/nearby` - POIs within a Euclidean distance of a point
//! - `GET|PUT|DELETE /api/v1/pois/{id}` - Read, partially update or delete one POI
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe

#![deny(warnings)]

pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use poi_service_shared::{AppState, MetricsLayer, health_live, health_ready, metrics_handler};

/// Build the service router.
///
/// `metrics_path` is where the Prometheus exposition is served.
pub fn app(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route(
            "/api/v1/pois",
            get(handlers::list_pois).post(handlers::create_poi),
        )
        .route("/api/v1/pois/search", get(handlers::search_by_name))
        .route("/api/v1/pois/nearby", post(handlers::nearby))
        .route(
            "/api/v1/pois/{id}",
            get(handlers::get_poi)
                .put(handlers::update_poi)
                .delete(handlers::delete_poi),
        )
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(MetricsLayer)
        .with_state(state)
}
