//! Application state for HTTP microservices.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the POI store, plus the bridge that runs blocking store calls on
//! tokio's blocking thread pool.

use std::sync::Arc;

use poi_lib::{Error as LibError, PoiStore, SqlitePoiStore};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// Failed to open the database or build the connection pool.
    StoreOpen { path: String, source: LibError },
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StoreOpen { path, source } => {
                write!(f, "failed to open poi store at {}: {}", path, source)
            }
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StoreOpen { source, .. } => Some(source),
        }
    }
}

/// Failure of a store call made through [`AppState::with_store`].
#[derive(Debug)]
pub enum StoreError {
    /// The store itself returned an error.
    Store(LibError),
    /// The blocking task panicked or was cancelled before finishing.
    TaskFailed(String),
}

impl StoreError {
    /// Whether the failure was caused by invalid input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Store(err) if err.is_validation())
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store operation failed: {}", e),
            Self::TaskFailed(reason) => write!(f, "store task failed: {}", reason),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::TaskFailed(_) => None,
        }
    }
}

impl From<LibError> for StoreError {
    fn from(err: LibError) -> Self {
        Self::Store(err)
    }
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use poi_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let count = state.with_store(|store| store.count()).await;
///     // ... use count
/// }
///
/// let state = AppState::open(&ServiceConfig::from_env()).unwrap();
/// let app = Router::new()
///     .route("/api/v1/pois", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn PoiStore>,
}

impl AppState {
    /// Open the SQLite store described by `config`.
    ///
    /// The database file and its parent directories are created when missing
    /// and the schema is initialised.
    pub fn open(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let path = config.database_path.display().to_string();

        tracing::info!(path = %path, pool_size = config.pool_size, "opening poi store");
        let store = SqlitePoiStore::open(&config.database_path, config.pool_size)
            .map_err(|source| AppStateError::StoreOpen { path, source })?;

        Ok(Self::from_store(store))
    }

    /// Create application state around an existing store.
    ///
    /// This is useful for testing or when the store is built elsewhere.
    pub fn from_store(store: impl PoiStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Access the store directly. Calls block the current thread.
    pub fn store(&self) -> &dyn PoiStore {
        self.store.as_ref()
    }

    /// Run a store operation on the blocking thread pool.
    ///
    /// The pooled connection used by `op` is acquired and released inside
    /// the blocking task.
    pub async fn with_store<F, T>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(&dyn PoiStore) -> poi_lib::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || op(store.as_ref())).await {
            Ok(result) => result.map_err(StoreError::Store),
            Err(join_error) => Err(StoreError::TaskFailed(join_error.to_string())),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &"dyn PoiStore")
            .field("store_handles", &Arc::strong_count(&self.store))
            .finish()
    }
}
