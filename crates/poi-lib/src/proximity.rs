//! Radius queries over an in-memory collection of points of interest.
//!
//! The filter is a linear scan: every candidate's Euclidean distance to the
//! query origin is compared against the radius and matches are returned in
//! input order. There is no index; callers materialize the full candidate set
//! (typically [`PoiStore::get_all`](crate::store::PoiStore::get_all)) and hand
//! it over.
//!
//! # Boundary policy
//!
//! - A candidate exactly `max_distance` away is included (`<=`).
//! - `max_distance == 0.0` matches only candidates coincident with the origin.
//! - A negative or NaN `max_distance` matches nothing. This is not an error.
//!
//! # Example
//!
//! ```
//! use poi_lib::{within_distance, Poi, Point, ProximityQuery};
//!
//! let pois = vec![
//!     Poi { id: 1, name: "A".into(), x: 0.0, y: 0.0 },
//!     Poi { id: 2, name: "B".into(), x: 3.0, y: 4.0 },
//! ];
//!
//! let near = within_distance(pois, &ProximityQuery::new(Point::new(0.0, 0.0), 4.9));
//! assert_eq!(near.len(), 1);
//! assert_eq!(near[0].name, "A");
//! ```

use crate::poi::{Poi, Point};

/// Origin and radius of a proximity search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub origin: Point,
    pub max_distance: f64,
}

impl ProximityQuery {
    pub fn new(origin: Point, max_distance: f64) -> Self {
        Self {
            origin,
            max_distance,
        }
    }

    /// Whether the radius can match anything at all.
    pub fn is_satisfiable(&self) -> bool {
        self.max_distance >= 0.0
    }

    /// True when `point` lies within `max_distance` of the origin.
    pub fn contains(&self, point: &Point) -> bool {
        self.is_satisfiable() && self.origin.distance_to(point) <= self.max_distance
    }
}

/// Keep the POIs within the query radius, preserving input order.
pub fn within_distance<I>(pois: I, query: &ProximityQuery) -> Vec<Poi>
where
    I: IntoIterator<Item = Poi>,
{
    if !query.is_satisfiable() {
        return Vec::new();
    }

    pois.into_iter()
        .filter(|poi| query.contains(&poi.position()))
        .collect()
}
