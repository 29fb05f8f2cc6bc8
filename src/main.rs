// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{bail, Context};
use tokio::net::TcpListener;

use stockguard::config::AppConfig;
use stockguard::repository::SqliteProductRepository;
use stockguard::state::AppState;
use stockguard::{database, routes, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env + environment)
    let config = AppConfig::from_env().context("failed to read configuration")?;

    // Initialize logging
    telemetry::init(config.log_format).context("failed to initialize logging")?;

    // Create database pool and schema
    let db_pool = database::create_pool(&config)
        .await
        .context("failed to create database pool")?;
    database::migrate(&db_pool)
        .await
        .context("failed to create database schema")?;

    // Create application state
    let repository = Arc::new(SqliteProductRepository::new(db_pool));
    let app = routes::build_app(AppState::new(repository));

    // Try port..port+span so an occupied port does not abort startup
    let mut bound = None;
    for offset in 0..=config.port_search_span {
        let addr = SocketAddr::from((config.host, config.port.saturating_add(offset)));
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                bound = Some((listener, addr));
                break;
            }
            Err(e) => {
                if offset == 0 {
                    tracing::warn!(%addr, error = %e, "Port in use, trying next");
                }
            }
        }
    }

    let Some((listener, addr)) = bound else {
        bail!(
            "failed to bind to any port starting at {} on {}",
            config.port,
            config.host
        );
    };

    tracing::info!("Server running on {}", addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
