//! Server entry point for the media downloader.

use anyhow::{Context, Result};
use clap::Parser;
use media_downloader_core::{DownloadService, HttpClient, ensure_storage_dir, router};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    let config = args.server_config();

    ensure_storage_dir(&config.storage_dir)
        .await
        .with_context(|| {
            format!(
                "failed to prepare storage directory {}",
                config.storage_dir.display()
            )
        })?;
    info!(storage_dir = %config.storage_dir.display(), "storage directory ready");

    let client = HttpClient::with_timeout(config.fetch_timeout)
        .context("failed to build HTTP client")?;
    let service = DownloadService::new(client, config.storage_dir.clone(), config.media_policy);
    let app = router(service);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to {bind_address}"))?;
    let local_addr = listener.local_addr().context("failed to read bound address")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %local_addr,
        media_policy = ?config.media_policy,
        timeout_secs = config.fetch_timeout.as_secs(),
        "Media downloader listening"
    );
    info!("Download endpoint: http://{local_addr}/api/download");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Media downloader stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
