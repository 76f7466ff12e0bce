//! llmc-lb (Leaderboard) - LLM comparison leaderboard service
//!
//! Aggregates benchmark scores, latency, registry metadata and pricing
//! into one canonical table at startup, then serves filtered views of it.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use llmc_common::config::{load_toml_config, resolve_root_folder, RootFolderInitializer};
use llmc_lb::fetch::{SourceClient, SourceUrls};
use llmc_lb::startup::load_canonical_table;
use llmc_lb::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for llmc-lb
#[derive(Parser, Debug)]
#[command(name = "llmc-lb")]
#[command(about = "LLM comparison leaderboard service")]
#[command(version)]
struct Args {
    /// TOML config file
    #[arg(short, long, env = "LLMC_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the canonical table cache
    #[arg(short, long, env = "LLMC_ROOT_FOLDER")]
    root_folder: Option<PathBuf>,

    /// Port to listen on (overrides the config file)
    #[arg(short, long, env = "LLMC_PORT")]
    port: Option<u16>,

    /// Ignore the cache and fetch every source again
    #[arg(long)]
    refresh: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_toml_config(args.config.as_deref()).context("Failed to load config")?;

    // Initialize tracing (RUST_LOG wins over the config file level)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("llmc_lb={0},llmc_common={0},tower_http=info", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification right after tracing init
    info!(
        "Starting LLM Calculator Leaderboard (llmc-lb) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer.ensure_directory_exists()?;
    let cache_path = initializer.cache_path(&config);
    info!("Cache path: {}", cache_path.display());

    let client = SourceClient::new(SourceUrls::from(&config))?;
    info!("Benchmark source: {}", client.urls().benchmark_base_url);

    // Fail fast: no partial table
    let table = load_canonical_table(&client, &cache_path, args.refresh).await?;

    let state = AppState::new(table);
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("llmc-lb listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
