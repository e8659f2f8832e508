use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use terminal_staffing_api::cli::Cli;
use terminal_staffing_api::config;
use terminal_staffing_api::database::DatabaseManager;
use terminal_staffing_api::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, SITE_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let cli = Cli::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting terminal staffing API in {:?} mode", config.environment);

    if config.security.debug_auth_bypass {
        tracing::warn!("SECURITY_DEBUG_AUTH_BYPASS is set: every request will be authorized");
        if is_production!() {
            tracing::warn!("Debug auth bypass is enabled in a production environment");
        }
    }

    let database = DatabaseManager::from_env(&config.database).context("failed to configure database")?;
    let session_store = database.session_store();
    if let Err(e) = session_store.migrate().await {
        tracing::warn!("Session table migration failed, sessions will error until the database is reachable: {}", e);
    }

    let state = AppState::from_database(config.clone(), database);

    let bind_addr = cli.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Terminal staffing API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, session_store)).await.context("server error")?;
    Ok(())
}
