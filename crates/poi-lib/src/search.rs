//! Name matching for point-of-interest lookups.
//!
//! Matching is a case-insensitive substring test using Unicode lower-casing,
//! so accented names fold the same way ASCII ones do. SQL `LIKE` only folds
//! ASCII, which is why the store filters with [`name_matches`] instead.

use crate::poi::Poi;

/// A lower-cased needle ready to be tested against many names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameQuery {
    needle: String,
}

impl NameQuery {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// The empty query matches every name.
    pub fn matches(&self, name: &str) -> bool {
        self.needle.is_empty() || name.to_lowercase().contains(&self.needle)
    }
}

/// True when `query` occurs in `name`, ignoring case.
pub fn name_matches(name: &str, query: &str) -> bool {
    NameQuery::new(query).matches(name)
}

/// Keep the POIs whose name contains `query`, preserving input order.
pub fn filter_by_name<I>(pois: I, query: &str) -> Vec<Poi>
where
    I: IntoIterator<Item = Poi>,
{
    let query = NameQuery::new(query);
    pois.into_iter()
        .filter(|poi| query.matches(&poi.name))
        .collect()
}
