//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use poi_lib::{NewPoi, PoiPatch, Point, ProximityQuery};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Request body for creating a point of interest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePoiRequest {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Validate for CreatePoiRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        NewPoi::from(self.clone())
            .validate()
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

impl From<CreatePoiRequest> for NewPoi {
    fn from(value: CreatePoiRequest) -> Self {
        NewPoi::new(value.name, value.x, value.y)
    }
}

/// Request body for a partial update. Absent or `null` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePoiRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Validate for UpdatePoiRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        PoiPatch::from(self.clone())
            .validate()
            .map_err(|e| Box::new(ProblemDetails::bad_request(e.to_string(), request_id)))
    }
}

impl From<UpdatePoiRequest> for PoiPatch {
    fn from(value: UpdatePoiRequest) -> Self {
        PoiPatch {
            name: value.name,
            x: value.x,
            y: value.y,
        }
    }
}

/// Request body for a proximity search.
///
/// A negative `max_distance` is accepted and simply matches nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProximitySearchRequest {
    pub x: f64,
    pub y: f64,
    pub max_distance: f64,
}

impl ProximitySearchRequest {
    pub fn query(&self) -> ProximityQuery {
        ProximityQuery::new(Point::new(self.x, self.y), self.max_distance)
    }
}

impl Validate for ProximitySearchRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        for (field, value) in [("x", self.x), ("y", self.y), ("max_distance", self.max_distance)] {
            if !value.is_finite() {
                return Err(Box::new(ProblemDetails::bad_request(
                    format!("The '{}' field must be a finite number", field),
                    request_id,
                )));
            }
        }
        Ok(())
    }
}

/// Query string for a name search (`?name=...`).
///
/// The parameter is required; an empty value matches every POI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameSearchQuery {
    pub name: String,
}
