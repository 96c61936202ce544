//! REST proxy
//!
//! Forwards every request to one backend, optionally delaying or blocking
//! it first based on path patterns. Meant for shaping test/dev traffic.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌──────────┐   ┌────────────┐   ┌─────────────┐
//!     ────────────────────▶│   net    │──▶│    http    │──▶│ dispatcher  │
//!                          │ listener │   │   server   │   │ delay/block │
//!                          └──────────┘   └────────────┘   └──────┬──────┘
//!                                                                 │
//!     Client Response                                             ▼
//!     ◀───────────────────────────────────────────────────┌─────────────┐
//!                                                         │  forwarder  │◀──▶ Backend
//!                                                         └─────────────┘
//! ```

use clap::Parser;

use rest_proxy::config::{load_config, Cli};
use rest_proxy::lifecycle::{signals, Shutdown};
use rest_proxy::net;
use rest_proxy::observability::logging;
use rest_proxy::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init(cli.log_format)?;

    tracing::info!(
        local_port = cli.local_port,
        backend_url = %cli.backend_url,
        delay_config = %cli.delay_config,
        block_config = %cli.block_config,
        "rest-proxy starting"
    );

    let config = load_config(&cli)?;

    let listener = net::bind(&config.listener).await?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
