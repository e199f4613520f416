use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use symcheck::api::{start_api_server, ApiContext};
use symcheck::config;
use symcheck::db::repository::session::purge_expired;
use symcheck::db::sqlite::open_database;
use symcheck::scoring::HttpScoringClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Apply migrations and drop stale sessions before accepting traffic
    let conn = open_database(&db_path)?;
    let purged = purge_expired(&conn)?;
    if purged > 0 {
        tracing::info!(purged, "removed expired sessions");
    }
    drop(conn);

    let scorer = Arc::new(HttpScoringClient::from_config());
    tracing::info!(model_service = %config::model_service_url(), "using model scoring service");

    let ctx = ApiContext::new(db_path, scorer);
    let mut server = start_api_server(ctx, config::bind_addr())
        .await
        .map_err(|e| -> Box<dyn std::error::Error> { e.into() })?;

    tracing::info!(addr = %server.addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    server.shutdown();

    Ok(())
}
