//! Spring Cloud Config CSI provider daemon.
//!
//! Serves the provider contract on a Unix domain socket until SIGINT/SIGTERM.

use std::sync::Arc;

use clap::Parser;

use scc_csi_provider::cli::CommonArgs;
use scc_csi_provider::lifecycle::{signals, startup, Shutdown};
use scc_csi_provider::observability::logging;
use scc_csi_provider::ProviderServer;

#[derive(Parser)]
#[command(name = "scc-provider")]
#[command(about = "Secrets Store CSI provider backed by Spring Cloud Config", long_about = None)]
struct Cli {
    /// Unix socket to serve the provider API on (overrides the config file).
    #[arg(long)]
    endpoint: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = cli.common.resolve_with(|config| {
        if let Some(endpoint) = cli.endpoint.clone() {
            config.server.socket_path = endpoint;
        }
    })?;

    logging::init_logging(&config.observability, cli.common.debug);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "scc-provider starting");

    startup::start_metrics(&config)?;
    let adapter = Arc::new(startup::build_adapter(&config)?);

    let server = ProviderServer::new(adapter, &config.server);
    let listener = server.bind().map_err(|e| {
        tracing::error!(socket = %config.server.socket_path, error = %e, "Failed to bind socket");
        e
    })?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
