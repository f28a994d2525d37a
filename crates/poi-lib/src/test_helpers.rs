// Test-only helpers for `poi-lib` tests
#![allow(dead_code)]
use crate::poi::{Poi, PoiId};

/// Builder to create `Poi` instances in tests with sensible defaults.
pub struct PoiBuilder {
    poi: Poi,
}

impl PoiBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            poi: Poi {
                id: 1,
                name: "POI 1".to_string(),
                x: 0.0,
                y: 0.0,
            },
        }
    }

    pub fn id(mut self, id: PoiId) -> Self {
        self.poi.id = id;
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.poi.name = name.to_string();
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.poi.x = x;
        self.poi.y = y;
        self
    }

    pub fn build(self) -> Poi {
        self.poi
    }
}

impl Default for PoiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a list of POIs with sequential ids from `(name, x, y)` tuples.
pub fn pois(entries: &[(&str, f64, f64)]) -> Vec<Poi> {
    entries
        .iter()
        .enumerate()
        .map(|(index, (name, x, y))| {
            PoiBuilder::new()
                .id(index as PoiId + 1)
                .name(name)
                .at(*x, *y)
                .build()
        })
        .collect()
}
