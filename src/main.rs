//! Tip jar overlay service.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────── tipjar ────────────────────────────┐
//!                  │                                                                 │
//!  REST backend ◀──┼── api::BackendClient ◀── alerts::AlertPoller (every 3s)         │
//!   /api/tips      │          ▲                        │ new tip identity            │
//!   /api/checkout  │          │                        ▼                             │
//!                  │          │               alerts::AlertDisplay ──▶ /overlay/ws ──┼──▶ OBS browser source
//!                  │          │                        ▲               /overlay/state│
//!                  │          │                        │                             │
//!                  │  payments::PaymentConfirmationPoller   admin (bearer) ◀─────────┼─── tipjar-cli / operator
//!                  │          ▲                                                      │
//!  checkout ───────┼──▶ /success?session_id=…                                        │
//!  redirect        └─────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tipjar::config::load_or_default;
use tipjar::observability::{logging, metrics};
use tipjar::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "tipjar")]
#[command(about = "Tip confirmation and streaming overlay alert service", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_or_default(args.config.as_deref())?;

    logging::init(&config.observability);

    tracing::info!("tipjar v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.base_url,
        alerts_enabled = config.alerts.enabled,
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config)?;
    server.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
