//! Portfolio site server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ security headers
//!                                                           │
//!                                                           ▼
//!                                                  CSP nonce middleware
//!                                                           │
//!                                                           ▼
//!                           handlers ◀── SiteState (config + content, ArcSwap)
//!                               │                ▲
//!                               ▼                │
//!                    pages + preferences     ConfigWatcher (notify)
//!                               │
//!     Client Response ◀─────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use portfolio_site::config::watcher::ConfigWatcher;
use portfolio_site::http::HttpServer;
use portfolio_site::lifecycle::{load_site, shutdown_signal, startup, Shutdown};
use portfolio_site::observability::{logging, metrics};

#[derive(Debug, Parser)]
#[command(name = "portfolio-site", version, about = "Serve the portfolio site")]
struct Args {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let site = load_site(args.config.as_deref())?;
    logging::init_logging(&site.config.observability);

    tracing::info!("portfolio-site v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %site.config.listener.bind_address,
        base_url = %site.config.site.base_url,
        content_dir = %site.config.content.directory,
        csp_enabled = site.config.security.csp_enabled,
        request_timeout_secs = site.config.timeouts.request_secs,
        "Configuration loaded"
    );

    if site.config.observability.metrics_enabled {
        match site.config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %site.config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&site.config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let watch_paths = startup::watch_paths(args.config.as_deref(), &site.config);
    let config_path = args.config.clone();
    let (watcher, updates) =
        ConfigWatcher::new(watch_paths, move || load_site(config_path.as_deref()));
    // Keep the handle alive for the life of the server.
    let _watcher = match watcher.run() {
        Ok(handle) => Some(handle),
        Err(e) => {
            tracing::warn!(error = %e, "Hot reload disabled");
            None
        }
    };

    let shutdown = Shutdown::new();
    let server = HttpServer::new(site.config, site.catalog);
    let server_shutdown = shutdown.subscribe();
    let mut server_task = tokio::spawn(server.run(listener, updates, server_shutdown));

    tokio::select! {
        _ = shutdown_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
        result = &mut server_task => result??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
