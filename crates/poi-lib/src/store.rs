//! Durable storage for points of interest.
//!
//! [`PoiStore`] is the seam between the HTTP/CLI layers and persistence.
//! [`SqlitePoiStore`] implements it on top of an `r2d2` pool of SQLite
//! connections: every operation checks a connection out of the pool and
//! returns it when the guard drops, including on error paths.

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::poi::{NewPoi, Poi, PoiId, PoiPatch};
use crate::search::filter_by_name;

/// Default number of pooled connections for file-backed stores.
pub const DEFAULT_POOL_SIZE: u32 = 8;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

// AUTOINCREMENT keeps ids of deleted rows from being handed out again.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS pois (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT    NOT NULL CHECK (length(trim(name)) > 0),
    x    REAL    NOT NULL,
    y    REAL    NOT NULL
);
"#;

const SELECT_COLUMNS: &str = "SELECT id, name, x, y FROM pois";

/// Persistence operations for points of interest.
///
/// "Not found" is a regular outcome (`None` / `false`), never an error.
pub trait PoiStore: Send + Sync {
    /// Persist a new record and return it with its assigned identifier.
    fn create(&self, poi: &NewPoi) -> Result<Poi>;

    /// Every stored record in insertion order.
    fn get_all(&self) -> Result<Vec<Poi>>;

    fn get(&self, id: PoiId) -> Result<Option<Poi>>;

    /// Records whose name contains `query`, ignoring case.
    fn find_by_name(&self, query: &str) -> Result<Vec<Poi>>;

    /// Apply `patch` to the record with `id`, returning the updated record.
    fn update(&self, id: PoiId, patch: &PoiPatch) -> Result<Option<Poi>>;

    /// Remove the record with `id`. Returns `false` when it did not exist.
    fn delete(&self, id: PoiId) -> Result<bool>;

    fn count(&self) -> Result<usize>;
}

/// SQLite-backed [`PoiStore`] with a process-owned connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone)]
pub struct SqlitePoiStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqlitePoiStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    ///
    /// Missing parent directories are created. `pool_size` is clamped to at
    /// least one connection.
    pub fn open(path: impl AsRef<Path>, pool_size: u32) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| Error::DatabaseDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let manager = SqliteConnectionManager::file(path).with_init(configure_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager)?;

        let store = Self { pool };
        store.init_schema()?;
        info!(path = %path.display(), pool_size = pool_size.max(1), "opened poi store");
        Ok(store)
    }

    /// Open a private in-memory database.
    ///
    /// SQLite gives every in-memory connection its own database, so the pool
    /// holds exactly one connection that is never recycled.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory().with_init(configure_connection);
        let pool = Pool::builder()
            .max_size(1)
            .min_idle(Some(1))
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;

        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    /// Create the `pois` table if it does not exist yet. Idempotent.
    pub fn init_schema(&self) -> Result<()> {
        self.connection()?.execute_batch(SCHEMA)?;
        debug!("poi schema ready");
        Ok(())
    }

    /// Number of connections currently held by the pool.
    pub fn pool_connections(&self) -> u32 {
        self.pool.state().connections
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl std::fmt::Debug for SqlitePoiStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.pool.state();
        f.debug_struct("SqlitePoiStore")
            .field("max_size", &self.pool.max_size())
            .field("connections", &state.connections)
            .field("idle_connections", &state.idle_connections)
            .finish()
    }
}

impl PoiStore for SqlitePoiStore {
    fn create(&self, poi: &NewPoi) -> Result<Poi> {
        poi.validate()?;

        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO pois (name, x, y) VALUES (?1, ?2, ?3)",
            params![poi.name, poi.x, poi.y],
        )?;
        let id = conn.last_insert_rowid();
        debug!(id, name = %poi.name, "created poi");

        Ok(Poi {
            id,
            name: poi.name.clone(),
            x: poi.x,
            y: poi.y,
        })
    }

    fn get_all(&self) -> Result<Vec<Poi>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let pois = stmt
            .query_map([], row_to_poi)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(pois)
    }

    fn get(&self, id: PoiId) -> Result<Option<Poi>> {
        let conn = self.connection()?;
        let poi = conn
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_poi)
            .optional()?;
        Ok(poi)
    }

    fn find_by_name(&self, query: &str) -> Result<Vec<Poi>> {
        Ok(filter_by_name(self.get_all()?, query))
    }

    fn update(&self, id: PoiId, patch: &PoiPatch) -> Result<Option<Poi>> {
        patch.validate()?;

        // Write lock is held from the first read until commit.
        let mut conn = self.connection()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = tx
            .query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), [id], row_to_poi)
            .optional()?;
        let mut poi = match existing {
            Some(poi) => poi,
            None => {
                debug!(id, "update target not found");
                return Ok(None);
            }
        };

        if !patch.is_empty() {
            patch.apply_to(&mut poi);
            tx.execute(
                "UPDATE pois SET name = ?1, x = ?2, y = ?3 WHERE id = ?4",
                params![poi.name, poi.x, poi.y, poi.id],
            )?;
        }
        tx.commit()?;

        debug!(id, "updated poi");
        Ok(Some(poi))
    }

    fn delete(&self, id: PoiId) -> Result<bool> {
        let conn = self.connection()?;
        let removed = conn.execute("DELETE FROM pois WHERE id = ?1", [id])?;
        debug!(id, removed, "deleted poi");
        Ok(removed > 0)
    }

    fn count(&self) -> Result<usize> {
        let conn = self.connection()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM pois", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn configure_connection(conn: &mut rusqlite::Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)
}

fn row_to_poi(row: &Row<'_>) -> rusqlite::Result<Poi> {
    Ok(Poi {
        id: row.get(0)?,
        name: row.get(1)?,
        x: row.get(2)?,
        y: row.get(3)?,
    })
}
