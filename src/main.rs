//! i18n-relay
//!
//! Main application entry point

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use i18n_relay::{config::Settings, handlers, utils::logging, I18nServices};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load configuration")?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer flushing
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", i18n_relay::info());

    let address = format!("{}:{}", settings.server.host, settings.server.port);

    // Initialize services
    info!("Initializing services...");
    let services = I18nServices::new(settings)?;

    if !services.remote.is_configured() {
        warn!("No remote API endpoint configured, translation requests will fail");
    }

    // Warm the cache before accepting requests
    let report = services.loader.preload_all().await;
    if !report.failed.is_empty() {
        warn!(failed = ?report.failed, "Some locales could not be preloaded, they will be fetched on demand");
    }

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    handlers::serve(listener, services, shutdown_signal()).await?;

    info!("i18n-relay has been shut down.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
