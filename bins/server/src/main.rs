//! FinReport API Server
//!
//! Main entry point for the FinReport backend service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use finreport_api::{AppState, create_router};
use finreport_db::connect_with_config;
use finreport_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(config.app.debug);

    let db = connect_with_config(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        environment = %config.app.environment,
        bot = %config.telegram.bot_name,
        "Starting {}",
        config.app.name
    );

    let app = create_router(AppState::new(config, db));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Human-readable logs in debug mode, JSON lines otherwise.
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "finreport=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    if debug {
        registry.with(tracing_subscriber::fmt::layer()).init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    }
}
