//! Listing and search commands.

use std::io::Write;

use anyhow::{bail, Context, Result};

use poi_lib::{within_distance, PoiStore, Point, ProximityQuery};

use super::Outcome;
use crate::output::{write_pois, OutputFormat};

/// Handle the `list` subcommand.
pub fn handle_list<W: Write>(store: &dyn PoiStore, out: &mut W, format: OutputFormat) -> Result<Outcome> {
    let pois = store.get_all().context("failed to list POIs")?;
    write_pois(out, "Points of interest", &pois, format)?;
    Ok(Outcome::Success)
}

/// Handle the `search` subcommand (case-insensitive substring match on names).
pub fn handle_search<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    name: &str,
) -> Result<Outcome> {
    let pois = store
        .find_by_name(name)
        .with_context(|| format!("failed to search POIs for '{}'", name))?;
    write_pois(out, &format!("Matches for '{}'", name), &pois, format)?;
    Ok(Outcome::Success)
}

/// Handle the `near` subcommand.
///
/// Non-finite input is rejected before the store is read. A negative
/// `max_distance` is not an error; it matches nothing.
pub fn handle_near<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    x: f64,
    y: f64,
    max_distance: f64,
) -> Result<Outcome> {
    for (field, value) in [("x", x), ("y", y), ("max_distance", max_distance)] {
        if !value.is_finite() {
            bail!("invalid {}: must be a finite number", field);
        }
    }

    let query = ProximityQuery::new(Point::new(x, y), max_distance);
    if !query.is_satisfiable() {
        tracing::warn!(max_distance, "negative max distance matches nothing");
    }

    let pois = within_distance(store.get_all().context("failed to load POIs")?, &query);
    write_pois(
        out,
        &format!("Within {} of ({}, {})", max_distance, x, y),
        &pois,
        format,
    )?;
    Ok(Outcome::Success)
}
