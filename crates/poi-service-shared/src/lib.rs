//! Shared infrastructure for the points-of-interest HTTP service.
//!
//! This crate provides the HTTP glue around `poi-lib`:
//!
//! - [`AppState`]: Pooled SQLite store shared by every handler
//! - [`ServiceConfig`]: Database path, bind address and pool size from the environment
//! - [`health`]: Liveness/readiness handlers
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request correlation and metrics middleware
//! - Request types with validation, and response envelopes
//!
//! # Architecture
//!
//! Handlers are thin; all record logic lives in `poi-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse request JSON / path / query                        │
//! │  - Validate parameters                                      │
//! │  - Call poi-lib on the blocking pool                        │
//! │  - Format response                                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides in-memory state for handler testing.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod config;
mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, DEFAULT_DATABASE_PATH, DEFAULT_PORT};
pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_poi_mutation, record_poi_query, record_query_results,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_json_rejection, from_lib_error, from_path_rejection, from_query_rejection,
    from_store_error, ProblemDetails, INTERNAL_ERROR_DETAIL, PROBLEM_INTERNAL_ERROR,
    PROBLEM_INVALID_REQUEST, PROBLEM_SERVICE_UNAVAILABLE,
};
pub use request::{
    CreatePoiRequest, NameSearchQuery, ProximitySearchRequest, UpdatePoiRequest, Validate,
};
pub use response::{DeleteResponse, PoiItem, PoiResponse, SearchResponse};
pub use state::{AppState, AppStateError, StoreError};
