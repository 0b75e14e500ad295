//! s3-browser - Web file manager for S3-compatible object storage
//!
//! Serves a static browser UI and a JSON API that lists, uploads, downloads
//! and deletes objects in one bucket.

use std::sync::Arc;

use clap::Parser;
use sb_s3::S3Client;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use s3_browser::args::Cli;
use s3_browser::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = cli.load_config()?;
    config.validate()?;

    let store = S3Client::new(&config.store).await?;
    let state = AppState::new(Arc::new(store), &config.server);
    let app = router(state, &config.server);

    let address = config.server.listen_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        address = %address,
        endpoint = %config.store.endpoint,
        bucket = %config.store.bucket,
        static_dir = %config.server.static_dir.display(),
        "S3 browser listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
