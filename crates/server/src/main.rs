use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use server::{AppState, app};
use services::services::{
    config::DashboardConfig, dashboard::DashboardService, feed_client::FarmApiClient,
    refresh::DashboardRefreshService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DashboardConfig::from_env().context("invalid dashboard configuration")?;
    let client = FarmApiClient::new(config.api_base_url.clone(), config.request_timeout)
        .context("failed to build farm api client")?;
    let dashboard = Arc::new(DashboardService::new(client, config.max_recommendations));

    if config.farm_id.trim().is_empty() {
        info!("no farm configured at startup, waiting for a farm context");
    } else {
        dashboard
            .initialize(
                config.farm_id.clone(),
                config.farm_coordinates,
                Vec::new(),
            )
            .await;
    }

    let refresh = DashboardRefreshService::spawn(dashboard.clone(), config.poll_interval);

    let addr: SocketAddr = std::env::var("DASHBOARD_BIND")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()
        .context("invalid DASHBOARD_BIND address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, upstream = %config.api_base_url, "farm dashboard server listening");

    let state = AppState { dashboard };
    axum::serve(listener, app(state))
        .await
        .context("server error")?;

    refresh.abort();
    Ok(())
}
