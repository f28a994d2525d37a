//! Health check handlers for liveness and readiness probes.
//!
//! Provides `/health/live` and `/health/ready` endpoints that return JSON
//! status responses.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health status response for liveness and readiness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok" or "not_ready: <reason>".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Number of POIs in the store (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pois_stored: Option<usize>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            pois_stored: None,
        }
    }

    /// Create a ready status with the current record count.
    pub fn ready(service: &str, version: &str, pois: usize) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            pois_stored: Some(pois),
        }
    }

    /// Create a not-ready status.
    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
            pois_stored: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Liveness probe handler.
///
/// Returns 200 OK while the process is running. Does not touch the store.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"poi-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness probe handler.
///
/// Returns 200 OK when a pooled connection can be acquired and the `pois`
/// table answers a count query, 503 otherwise.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"poi-service-shared","version":"0.1.0","pois_stored":12}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match state.with_store(|store| store.count()).await {
        Ok(count) => (StatusCode::OK, Json(HealthStatus::ready(service, version, count)))
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            let status = HealthStatus::not_ready(service, version, "store unreachable");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}
