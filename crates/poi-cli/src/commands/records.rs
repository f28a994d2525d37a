//! Commands that create, read, change or remove a single POI.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use poi_lib::{NewPoi, PoiId, PoiPatch, PoiStore};

use super::Outcome;
use crate::output::{write_deleted, write_poi, OutputFormat};

/// Handle the `init` subcommand: create the database file and schema.
pub fn handle_init<W: Write>(store: &dyn PoiStore, database: &Path, out: &mut W) -> Result<Outcome> {
    let count = store.count().context("failed to read the initialised database")?;
    writeln!(
        out,
        "Database ready at {} ({} POIs stored)",
        database.display(),
        count
    )?;
    Ok(Outcome::Success)
}

/// Handle the `add` subcommand.
pub fn handle_add<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    name: &str,
    x: f64,
    y: f64,
) -> Result<Outcome> {
    let poi = store
        .create(&NewPoi::new(name, x, y))
        .with_context(|| format!("failed to add POI '{}'", name))?;
    tracing::debug!(id = poi.id, "poi created");
    write_poi(out, "Created", &poi, format)?;
    Ok(Outcome::Success)
}

/// Handle the `show` subcommand.
pub fn handle_show<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    id: PoiId,
) -> Result<Outcome> {
    match store.get(id).with_context(|| format!("failed to read POI {}", id))? {
        Some(poi) => {
            write_poi(out, "Found", &poi, format)?;
            Ok(Outcome::Success)
        }
        None => not_found(id),
    }
}

/// Handle the `update` subcommand. Omitted flags leave the field unchanged.
pub fn handle_update<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    id: PoiId,
    patch: &PoiPatch,
) -> Result<Outcome> {
    if patch.is_empty() {
        tracing::warn!(id, "update without --name, --x or --y changes nothing");
    }
    match store
        .update(id, patch)
        .with_context(|| format!("failed to update POI {}", id))?
    {
        Some(poi) => {
            write_poi(out, "Updated", &poi, format)?;
            Ok(Outcome::Success)
        }
        None => not_found(id),
    }
}

/// Handle the `delete` subcommand.
pub fn handle_delete<W: Write>(
    store: &dyn PoiStore,
    out: &mut W,
    format: OutputFormat,
    id: PoiId,
) -> Result<Outcome> {
    if store
        .delete(id)
        .with_context(|| format!("failed to delete POI {}", id))?
    {
        write_deleted(out, id, format)?;
        Ok(Outcome::Success)
    } else {
        not_found(id)
    }
}

fn not_found(id: PoiId) -> Result<Outcome> {
    eprintln!("POI with ID {} not found", id);
    Ok(Outcome::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poi_lib::SqlitePoiStore;

    fn store() -> SqlitePoiStore {
        SqlitePoiStore::in_memory().expect("in-memory store")
    }

    fn run(f: impl FnOnce(&mut Vec<u8>) -> Result<Outcome>) -> (Outcome, String) {
        let mut buf = Vec::new();
        let outcome = f(&mut buf).expect("command succeeds");
        (outcome, String::from_utf8(buf).expect("utf-8"))
    }

    #[test]
    fn add_then_show() {
        let store = store();
        let (outcome, text) =
            run(|out| handle_add(&store, out, OutputFormat::Text, "Bakery", 23.0, 42.0));
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(text, "Created POI 1: Bakery at (23, 42)\n");

        let (outcome, text) = run(|out| handle_show(&store, out, OutputFormat::Text, 1));
        assert_eq!(outcome, Outcome::Success);
        assert!(text.contains("Bakery"));
    }

    #[test]
    fn add_rejects_blank_name() {
        let store = store();
        let mut buf = Vec::new();
        let err = handle_add(&store, &mut buf, OutputFormat::Text, " ", 0.0, 0.0).unwrap_err();
        assert!(format!("{:#}", err).contains("name"));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn show_missing_is_not_found() {
        let store = store();
        let (outcome, text) = run(|out| handle_show(&store, out, OutputFormat::Text, 9999));
        assert_eq!(outcome, Outcome::NotFound);
        assert!(text.is_empty());
    }

    #[test]
    fn update_changes_only_given_fields() {
        let store = store();
        store.create(&NewPoi::new("Old", 10.0, 20.0)).unwrap();

        let patch = PoiPatch::default().name("New");
        let (outcome, _) = run(|out| handle_update(&store, out, OutputFormat::Text, 1, &patch));
        assert_eq!(outcome, Outcome::Success);

        let poi = store.get(1).unwrap().unwrap();
        assert_eq!(poi.name, "New");
        assert_eq!((poi.x, poi.y), (10.0, 20.0));
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = store();
        let patch = PoiPatch::default().x(1.0);
        let (outcome, _) = run(|out| handle_update(&store, out, OutputFormat::Json, 9999, &patch));
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[test]
    fn delete_twice() {
        let store = store();
        store.create(&NewPoi::new("Temp", 0.0, 0.0)).unwrap();

        let (first, text) = run(|out| handle_delete(&store, out, OutputFormat::Text, 1));
        assert_eq!(first, Outcome::Success);
        assert_eq!(text, "Deleted POI 1\n");

        let (second, _) = run(|out| handle_delete(&store, out, OutputFormat::Text, 1));
        assert_eq!(second, Outcome::NotFound);
    }

    #[test]
    fn init_reports_count() {
        let store = store();
        let (outcome, text) = run(|out| handle_init(&store, Path::new("pois.db"), out));
        assert_eq!(outcome, Outcome::Success);
        assert!(text.contains("pois.db"));
        assert!(text.contains("0 POIs"));
    }
}
