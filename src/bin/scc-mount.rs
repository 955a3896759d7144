//! One-shot mount: performs a single `Mount` from command-line flags and exits.
//!
//! Mirrors the provider contract so the driver (or an operator) can run the
//! provider as a plain executable instead of a socket server.

use clap::Parser;

use scc_csi_provider::cli::CommonArgs;
use scc_csi_provider::lifecycle::startup;
use scc_csi_provider::observability::logging;
use scc_csi_provider::rpc::MountRequest;

#[derive(Parser)]
#[command(name = "scc-mount")]
#[command(about = "Mount Spring Cloud Config files once and exit", long_about = None)]
struct Cli {
    /// Volume attributes (JSON object).
    #[arg(long, default_value = "")]
    attributes: String,

    /// Node publish ref secret (JSON object).
    #[arg(long, default_value = "")]
    secrets: String,

    /// Target path to write data.
    #[arg(long = "target-path", alias = "targetPath", default_value = "")]
    target_path: String,

    /// File permission (JSON number, decimal file mode).
    #[arg(long, default_value = "")]
    permission: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.common.resolve()?;
    logging::init_logging(&config.observability, cli.common.debug);

    let adapter = startup::build_adapter(&config)?;
    let request = MountRequest {
        attributes: cli.attributes,
        secrets: cli.secrets,
        target_path: cli.target_path,
        permission: cli.permission,
    };

    if let Err(e) = adapter.mount(&request).await {
        tracing::error!(code = %e.code(), "[error] : {}", e);
        std::process::exit(1);
    }

    Ok(())
}
