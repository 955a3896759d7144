//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated config into the shared client and adapter
//! - Start optional background pieces (metrics endpoint)
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The HTTP client and backoff policy are built exactly once

use std::net::SocketAddr;

use thiserror::Error;

use crate::client::SpringConfigClient;
use crate::config::ProviderConfig;
use crate::mount::MountPipeline;
use crate::observability::metrics;
use crate::rpc::ProviderAdapter;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Build the adapter every transport dispatches to.
pub fn build_adapter(
    config: &ProviderConfig,
) -> Result<ProviderAdapter<SpringConfigClient>, StartupError> {
    let client = SpringConfigClient::from_config(&config.client, &config.retries)?;

    tracing::info!(
        timeout_secs = config.client.timeout_secs,
        retry_base_delay_ms = config.retries.base_delay_ms,
        retry_max = config.retries.max_retries,
        "Config server client ready"
    );

    Ok(ProviderAdapter::new(MountPipeline::new(client)))
}

/// Install the metrics exporter if enabled. Must run inside the runtime.
pub fn start_metrics(config: &ProviderConfig) -> Result<(), StartupError> {
    if !config.observability.metrics_enabled {
        return Ok(());
    }
    let addr: SocketAddr = config
        .observability
        .metrics_address
        .parse()
        .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
    metrics::init_metrics(addr);
    Ok(())
}
