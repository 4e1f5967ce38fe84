//! playback-api - PlayBack backend service
//!
//! Serves the PlayBack music-discussion API: catalog search/detail proxying
//! over the external music catalog, mood/vibe tags, comments, and
//! cookie-session accounts, all backed by SQLite.

use anyhow::Result;
use axum::http::HeaderValue;
use clap::Parser;
use tracing::info;

use playback_api::config::Args;
use playback_api::{build_router, AppState, CatalogClient};
use playback_common::config::{database_path, resolve_catalog_credentials, resolve_data_folder};
use playback_common::db::init_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting PlayBack backend (playback-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Resolve data folder (CLI > env > config file > platform default)
    let data_folder = resolve_data_folder(args.data_folder.as_deref());
    let db_path = database_path(&data_folder);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    // Stale sessions accumulate between restarts; clear them out up front
    let purged = playback_common::db::sessions::purge_expired(&pool).await?;
    if purged > 0 {
        info!("Purged {} expired sessions", purged);
    }

    // Catalog credentials are required; without them every search would fail
    let credentials =
        resolve_catalog_credentials(args.client_id.as_deref(), args.client_secret.as_deref())?;
    let catalog = CatalogClient::new(credentials)?;

    let frontend_origin: HeaderValue = args
        .frontend_origin
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid frontend origin: {}", args.frontend_origin))?;
    info!("Allowing credentialed requests from {}", args.frontend_origin);

    let state = AppState::new(pool, catalog);
    let app = build_router(state, frontend_origin);

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("playback-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
