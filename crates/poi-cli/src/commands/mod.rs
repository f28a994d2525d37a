// Module exports for CLI subcommands.
//
// `records` holds the commands that create, read or change a single POI;
// `query` holds the list and search commands. main.rs only parses arguments
// and dispatches here.

pub mod query;
pub mod records;

use std::path::Path;

use anyhow::{Context, Result};

use poi_lib::SqlitePoiStore;

/// Result of a command that ran without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The referenced POI does not exist. The process exits with status 1.
    NotFound,
}

/// Open the database used by every subcommand.
///
/// The CLI issues one statement at a time, so a single pooled connection is enough.
pub fn open_store(path: &Path) -> Result<SqlitePoiStore> {
    SqlitePoiStore::open(path, 1)
        .with_context(|| format!("failed to open poi database at {}", path.display()))
}
