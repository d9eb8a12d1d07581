//! Route service binary.
//!
//! Wires configuration, logging, the OSRM provider, the aggregation engine
//! and the REST router together, then serves until interrupted.

use anyhow::{Context, Result};
use route_service::api::rest::{AppState, create_router};
use route_service::application::services::RouteAggregationEngine;
use route_service::config::{AppConfig, LogConfig};
use route_service::infrastructure::routing::{OsrmConfig, OsrmRoutingProvider};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.log);

    let provider = OsrmRoutingProvider::new(OsrmConfig::from(&config.routing))
        .context("failed to build routing provider")?;
    let engine = Arc::new(RouteAggregationEngine::with_defaults(Arc::new(provider)));

    let shutdown = CancellationToken::new();
    let router = create_router(AppState::new(engine, shutdown.clone()));

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(
        %addr,
        provider = %config.routing.base_url,
        profile = %config.routing.profile,
        "route service listening"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
        .context("server error")?;

    info!("route service stopped");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if log.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

/// Resolves on Ctrl-C or SIGTERM and cancels in-flight requests.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
    shutdown.cancel();
}
