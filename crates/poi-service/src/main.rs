//! Points-of-interest HTTP service binary.
//!
//! # Configuration
//!
//! - `POI_DATABASE_PATH` - SQLite database file (default: pois.db)
//! - `POI_POOL_SIZE` - Maximum pooled connections (default: 8)
//! - `SERVICE_HOST` - Bind address (default: 0.0.0.0)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `METRICS_ENABLED`, `METRICS_PATH` - Prometheus exposition

use tracing::{error, info};

use poi_service::app;
use poi_service_shared::{
    AppState, LoggingConfig, MetricsConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config);

    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        service = logging_config.service_name(env!("CARGO_PKG_NAME")),
        database = %config.database_path.display(),
        pool_size = config.pool_size,
        "starting poi service"
    );

    let state = AppState::open(&config).map_err(|e| {
        error!(error = %e, "failed to open poi store");
        e
    })?;

    let router = app(state, &metrics_config.path);

    let addr = config.socket_addr();
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
