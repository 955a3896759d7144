//! Command-line flags shared by the binaries.

use std::path::PathBuf;

use clap::Args;

use crate::config::{load_config, validation::validate_config, ConfigError, ProviderConfig};

/// Flags that shape the provider configuration.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Optional TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base wait between retries of failed config server calls, in milliseconds.
    #[arg(long = "retry-base-wait-ms")]
    pub retry_base_wait_ms: Option<u64>,

    /// Maximum number of retries per call (0 disables retries).
    #[arg(long = "retry-max")]
    pub retry_max: Option<u32>,

    /// Per-request HTTP timeout towards the config server, in seconds.
    #[arg(long = "http-timeout-secs")]
    pub http_timeout_secs: Option<u64>,

    /// Sets log level to debug.
    #[arg(long)]
    pub debug: bool,
}

impl CommonArgs {
    /// Load the config file (or defaults) and apply flag overrides.
    pub fn resolve(&self) -> Result<ProviderConfig, ConfigError> {
        self.resolve_with(|_| {})
    }

    /// Like [`resolve`](Self::resolve), with binary-specific overrides applied
    /// before validation.
    pub fn resolve_with<F>(&self, overrides: F) -> Result<ProviderConfig, ConfigError>
    where
        F: FnOnce(&mut ProviderConfig),
    {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProviderConfig::default(),
        };
        self.apply(&mut config);
        overrides(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(&self, config: &mut ProviderConfig) {
        if let Some(base) = self.retry_base_wait_ms {
            config.retries.base_delay_ms = base;
        }
        if let Some(max) = self.retry_max {
            config.retries.max_retries = max;
        }
        if let Some(timeout) = self.http_timeout_secs {
            config.client.timeout_secs = timeout;
        }
        if self.debug {
            config.observability.log_level = "debug".to_string();
        }
    }
}
