//! Presto Exporter Binary Entry Point
//!
//! This binary serves Presto cluster status as Prometheus metrics.
//! Core functionality is provided by the `presto_exporter` library crate.

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use presto_exporter::{
    collector::{ClusterCollector, MetricCatalog},
    config::{AppConfig, parse_duration},
    server::{AppState, create_router},
};
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Presto Exporter - Prometheus metrics for Presto clusters
#[derive(Parser, Debug)]
#[command(name = "presto_exporter", version, about, long_about = None)]
struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long, env = "PRESTO_EXPORTER_CONFIG")]
    config: Option<String>,

    /// Address on which to expose metrics and web interface [default: :9482]
    #[arg(long = "web.listen-address", env = "PRESTO_EXPORTER_LISTEN_ADDRESS")]
    listen_address: Option<String>,

    /// Path under which to expose metrics [default: /metrics]
    #[arg(long = "web.telemetry-path", env = "PRESTO_EXPORTER_TELEMETRY_PATH")]
    telemetry_path: Option<String>,

    /// Presto cluster address [default: http://localhost:8080/v1/cluster]
    #[arg(long = "web.url", env = "PRESTO_EXPORTER_URL")]
    url: Option<String>,

    /// Upstream request timeout, e.g. `10s` (default: HTTP client default)
    #[arg(long = "web.timeout", env = "PRESTO_EXPORTER_TIMEOUT", value_parser = parse_duration)]
    timeout: Option<Duration>,

    /// Log level used when RUST_LOG is not set
    #[arg(long = "log.level", env = "PRESTO_EXPORTER_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting {}",
        env!("CARGO_PKG_NAME")
    );

    // Load configuration file if given
    let mut config = match cli.config {
        Some(ref path) => {
            tracing::info!("Loading configuration from: {}", path);
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(listen_address) = cli.listen_address {
        config.server.listen_address = listen_address;
    }
    if let Some(telemetry_path) = cli.telemetry_path {
        config.server.telemetry_path = telemetry_path;
    }
    if let Some(url) = cli.url {
        config.cluster.url = url;
    }
    if let Some(timeout) = cli.timeout {
        config.cluster.timeout = Some(timeout);
    }
    config.validate()?;

    tracing::info!(
        listen_address = %config.server.listen_address,
        telemetry_path = %config.server.telemetry_path,
        url = %config.cluster.url,
        timeout = ?config.cluster.timeout,
        "Configuration loaded"
    );

    // The collector's blocking HTTP client is created outside the async runtime.
    let catalog = MetricCatalog::presto_cluster()?;
    let collector = ClusterCollector::new(config.cluster.clone(), catalog)?;
    tracing::info!(
        url = %collector.config().url,
        metrics = collector.catalog().len(),
        "Cluster collector ready"
    );

    let registry = Registry::new();
    registry.register(Box::new(collector))?;

    let addr = config.server.socket_addr()?;
    let app_state = AppState {
        registry,
        telemetry_path: config.server.telemetry_path.clone(),
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(serve(addr, app_state))
}

/// Bind the listener and serve until a shutdown signal arrives.
async fn serve(addr: SocketAddr, state: AppState) -> Result<(), Box<dyn std::error::Error>> {
    // Build Axum router
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!(address = %addr, error = %e, "Failed to bind listener");
        e
    })?;

    tracing::info!("Listening on: http://{}", addr);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Setup graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }
}
