//! RFC 9457 Problem Details for HTTP APIs.
//!
//! Provides structured error responses following the Problem Details standard.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>
//!
//! Only validation failures carry a specific `detail`. Storage failures are
//! logged here with their full cause and reach the client as a generic
//! internal error.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use poi_lib::Error as LibError;

use crate::state::StoreError;

/// Problem type URI for invalid request parameters.
pub const PROBLEM_INVALID_REQUEST: &str = "/problems/invalid-request";

/// Problem type URI for internal server errors.
pub const PROBLEM_INTERNAL_ERROR: &str = "/problems/internal-error";

/// Problem type URI for service unavailable (e.g., database unreachable).
pub const PROBLEM_SERVICE_UNAVAILABLE: &str = "/problems/service-unavailable";

/// Client-facing detail for every storage failure.
pub const INTERNAL_ERROR_DETAIL: &str = "An internal error occurred while processing the request";

/// RFC 9457 Problem Details response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    /// HTTP status code for this problem.
    pub status: u16,

    /// Human-readable explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// URI reference identifying the specific occurrence (e.g., request ID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    /// Create a new ProblemDetails with required fields.
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    /// Add a detailed explanation of this specific problem occurrence.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add the request identifier for tracing.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// Create a 400 Bad Request problem for invalid input.
    pub fn bad_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::invalid_request(StatusCode::BAD_REQUEST, detail, request_id)
    }

    /// Create an invalid-request problem with an explicit status (400 or 422).
    pub fn invalid_request(
        status: StatusCode,
        detail: impl Into<String>,
        request_id: impl Into<String>,
    ) -> Self {
        Self::new(PROBLEM_INVALID_REQUEST, "Invalid Request", status)
            .with_detail(detail)
            .with_request_id(request_id)
    }

    /// Create a 500 Internal Server Error problem.
    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_INTERNAL_ERROR,
            "Internal Error",
            StatusCode::INTERNAL_SERVER_ERROR,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// Create a 503 Service Unavailable problem.
    pub fn service_unavailable(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_SERVICE_UNAVAILABLE,
            "Service Unavailable",
            StatusCode::SERVICE_UNAVAILABLE,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// The HTTP status as a `StatusCode`.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Implement IntoResponse for axum to return ProblemDetails as HTTP responses.
impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut response = Json(&self).into_response();
        response.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            axum::http::HeaderValue::from_static("application/problem+json"),
        );

        *response.status_mut() = status;
        response
    }
}

/// Convert library errors to ProblemDetails.
///
/// The `request_id` must be provided separately since library errors don't have it.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::Validation { .. } => ProblemDetails::bad_request(error.to_string(), request_id),
        LibError::Pool(_) => {
            tracing::error!(request_id, error = %error, "connection pool unavailable");
            ProblemDetails::service_unavailable(INTERNAL_ERROR_DETAIL, request_id)
        }
        _ => {
            tracing::error!(request_id, error = %error, "store operation failed");
            ProblemDetails::internal_error(INTERNAL_ERROR_DETAIL, request_id)
        }
    }
}

/// Convert failures of [`AppState::with_store`](crate::AppState::with_store) to ProblemDetails.
pub fn from_store_error(error: &StoreError, request_id: &str) -> ProblemDetails {
    match error {
        StoreError::Store(lib_error) => from_lib_error(lib_error, request_id),
        StoreError::TaskFailed(reason) => {
            tracing::error!(request_id, reason = %reason, "store task did not complete");
            ProblemDetails::internal_error(INTERNAL_ERROR_DETAIL, request_id)
        }
    }
}

/// Convert a rejected JSON body into a 400/422 problem that names the defect.
pub fn from_json_rejection(rejection: &JsonRejection, request_id: &str) -> ProblemDetails {
    ProblemDetails::invalid_request(rejection.status(), rejection.body_text(), request_id)
}

/// Convert a rejected path parameter (e.g. a non-numeric id) into a problem.
pub fn from_path_rejection(rejection: &PathRejection, request_id: &str) -> ProblemDetails {
    ProblemDetails::invalid_request(rejection.status(), rejection.body_text(), request_id)
}

/// Convert a rejected query string into a problem.
pub fn from_query_rejection(rejection: &QueryRejection, request_id: &str) -> ProblemDetails {
    ProblemDetails::invalid_request(rejection.status(), rejection.body_text(), request_id)
}
