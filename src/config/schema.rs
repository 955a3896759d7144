//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the provider.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the provider.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    /// RPC server settings (socket, request deadline).
    pub server: ServerConfig,

    /// Outbound HTTP client settings.
    pub client: ClientConfig,

    /// Retry configuration for config server calls.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// RPC server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Unix domain socket the orchestrator connects to.
    pub socket_path: String,

    /// Deadline for a whole mount request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            socket_path: "/etc/kubernetes/secrets-store-csi-providers/spring-cloud-config.sock"
                .to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// HTTP client configuration for the config server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-attempt request timeout in seconds.
    pub timeout_secs: u64,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            user_agent: format!("scc-csi-provider/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Retry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Base delay for exponential backoff in milliseconds.
    pub base_delay_ms: u64,

    /// Maximum number of retries after the first attempt (0 disables retries).
    pub max_retries: u32,

    /// Maximum delay for exponential backoff in milliseconds (0 = uncapped).
    pub max_delay_ms: u64,

    /// Add up to 10% random jitter to each delay.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 500,
            max_retries: 3,
            max_delay_ms: 10_000,
            jitter: false,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log format ("text" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
