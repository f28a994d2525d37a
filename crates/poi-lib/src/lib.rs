//! Points-of-interest library entry points.
//!
//! This crate owns the POI data model, the SQLite-backed store, name search
//! and the proximity filter. Higher-level consumers (the HTTP service and the
//! CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.
//!

#![deny(warnings)]

pub mod error;
pub mod poi;
pub mod proximity;
pub mod search;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{Error, Result};
pub use poi::{NewPoi, Poi, PoiId, PoiPatch, Point};
pub use proximity::{within_distance, ProximityQuery};
pub use search::{filter_by_name, name_matches, NameQuery};
pub use store::{PoiStore, SqlitePoiStore, DEFAULT_POOL_SIZE};
