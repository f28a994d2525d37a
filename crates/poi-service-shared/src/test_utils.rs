//! Test utilities for handler testing.
//!
//! Every call returns a fresh in-memory store, so tests never share records.

use poi_lib::{NewPoi, SqlitePoiStore};

use crate::state::AppState;

/// Records loaded by [`seeded_state`], as `(name, x, y)`.
pub const SEED_POIS: &[(&str, f64, f64)] = &[
    ("Lanchonete", 27.0, 12.0),
    ("Posto", 31.0, 18.0),
    ("Joalheria", 15.0, 12.0),
    ("Floricultura", 19.0, 21.0),
    ("Pub", 12.0, 8.0),
    ("Supermercado", 23.0, 6.0),
    ("Churrascaria", 28.0, 2.0),
];

/// An `AppState` over an empty in-memory store.
///
/// # Panics
///
/// Panics if the in-memory database cannot be created.
pub fn test_state() -> AppState {
    let store = SqlitePoiStore::in_memory()
        .unwrap_or_else(|e| panic!("failed to open in-memory store: {}", e));
    AppState::from_store(store)
}

/// An `AppState` preloaded with [`SEED_POIS`] in order, so ids run from 1.
///
/// # Panics
///
/// Panics if a seed record cannot be inserted.
pub fn seeded_state() -> AppState {
    let state = test_state();
    for (name, x, y) in SEED_POIS {
        state
            .store()
            .create(&NewPoi::new(*name, *x, *y))
            .unwrap_or_else(|e| panic!("failed to seed {}: {}", name, e));
    }
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_starts_empty() {
        assert_eq!(test_state().store().count().unwrap(), 0);
    }

    #[test]
    fn test_states_are_isolated() {
        let a = test_state();
        let b = test_state();
        a.store().create(&NewPoi::new("Only here", 0.0, 0.0)).unwrap();
        assert_eq!(b.store().count().unwrap(), 0);
    }

    #[test]
    fn test_seeded_state_contains_seed_in_order() {
        let state = seeded_state();
        let all = state.store().get_all().unwrap();
        assert_eq!(all.len(), SEED_POIS.len());
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].name, "Lanchonete");
        assert_eq!(all[6].name, "Churrascaria");
    }
}
