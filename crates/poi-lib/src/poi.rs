//! Point-of-interest data model.
//!
//! Coordinates are `f64` throughout. A [`Poi`] is only ever produced by a
//! store, which assigns its identifier; callers describe new records with
//! [`NewPoi`] and partial changes with [`PoiPatch`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Numeric identifier for a point of interest.
pub type PoiId = i64;

/// A position on the 2-D plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate the Euclidean distance to another point.
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A stored point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    pub id: PoiId,
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl Poi {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Attributes of a point of interest that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPoi {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl NewPoi {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Check the name is non-blank and both coordinates are finite.
    pub fn validate(&self) -> Result<()> {
        validate_name(&self.name)?;
        validate_coordinate("x", self.x)?;
        validate_coordinate("y", self.y)
    }
}

/// Partial update for a stored point of interest.
///
/// Each `None` field leaves the corresponding attribute untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoiPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl PoiPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// True when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.x.is_none() && self.y.is_none()
    }

    /// Validate only the fields that are present.
    pub fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(x) = self.x {
            validate_coordinate("x", x)?;
        }
        if let Some(y) = self.y {
            validate_coordinate("y", y)?;
        }
        Ok(())
    }

    /// Apply every present field to `poi`. The identifier is never touched.
    pub fn apply_to(&self, poi: &mut Poi) {
        if let Some(name) = &self.name {
            poi.name.clone_from(name);
        }
        if let Some(x) = self.x {
            poi.x = x;
        }
        if let Some(y) = self.y {
            poi.y = y;
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("name", "must not be empty"));
    }
    Ok(())
}

fn validate_coordinate(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::validation(field, "must be a finite number"));
    }
    Ok(())
}
