//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, enrichment setup, worker spawning, and
//! Axum server lifecycle.

use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::enrichment::{GeoLookup, HeuristicUaParser, MaxMindGeo, NoopGeo, UaParser};
use crate::infrastructure::persistence::{PgClickRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - GeoIP reader (or no-op lookup when unconfigured)
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let geo: Arc<dyn GeoLookup> = match &config.geoip_db_path {
        Some(path) => match MaxMindGeo::open(path) {
            Ok(reader) => Arc::new(reader),
            Err(e) => {
                tracing::warn!(error = %e, "GeoIP database unavailable, clicks will record Unknown location");
                Arc::new(NoopGeo)
            }
        },
        None => {
            tracing::info!("GeoIP disabled, clicks will record Unknown location");
            Arc::new(NoopGeo)
        }
    };
    let ua: Arc<dyn UaParser> = Arc::new(HeuristicUaParser);

    let pool = Arc::new(pool);
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    tokio::spawn(run_click_worker(click_rx, clicks.clone(), geo, ua));
    tracing::info!("Click worker started");

    let state = AppState::new(links, clicks, click_tx);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
