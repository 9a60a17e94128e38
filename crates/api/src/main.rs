use std::sync::Arc;

use anyhow::Context;

use aquaserve_api::app::{self, services::AppServices};
use aquaserve_api::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env().context("invalid configuration")?;
    aquaserve_observability::init(config.log_format);

    tracing::info!(
        capacity = config.registry.capacity,
        currency = config.tariff.currency(),
        bands = config.tariff.bands().len(),
        "starting customer registry"
    );

    let services = Arc::new(AppServices::from_config(&config));
    let router = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
