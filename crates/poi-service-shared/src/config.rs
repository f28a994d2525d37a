//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `POI_DATABASE_PATH`: SQLite database file (default: `pois.db`)
//! - `SERVICE_HOST`: Bind address (default: `0.0.0.0`)
//! - `SERVICE_PORT`: HTTP port (default: `8080`)
//! - `POI_POOL_SIZE`: Pooled database connections (default: `8`, minimum `1`)
//!
//! Values that fail to parse fall back to their default with a warning.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use poi_lib::DEFAULT_POOL_SIZE;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Default database location, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "pois.db";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Address to bind the listener to.
    pub host: IpAddr,
    /// Port to bind the listener to.
    pub port: u16,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    ///
    /// Used by [`from_env`](Self::from_env); tests pass a map instead of
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_path = lookup("POI_DATABASE_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.database_path);

        let host = parse_or(&lookup, "SERVICE_HOST", defaults.host);
        let port = parse_or(&lookup, "SERVICE_PORT", defaults.port);
        let pool_size = parse_or(&lookup, "POI_POOL_SIZE", defaults.pool_size).max(1);

        Self {
            database_path,
            host,
            port,
            pool_size,
        }
    }

    /// Socket address the service should listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "ignoring unparseable setting");
            default
        }),
        None => default,
    }
}
