//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, known log levels)
//! - Check addresses parse before anything binds to them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProviderConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ProviderConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["text", "json"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ProviderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.socket_path.trim().is_empty() {
        errors.push(ValidationError::new("server.socket_path", "must not be empty"));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "server.request_timeout_secs",
            "must be greater than 0",
        ));
    }
    if config.client.timeout_secs == 0 {
        errors.push(ValidationError::new("client.timeout_secs", "must be greater than 0"));
    }
    if config.retries.max_retries > 0 && config.retries.base_delay_ms == 0 {
        errors.push(ValidationError::new(
            "retries.base_delay_ms",
            "must be greater than 0 when retries are enabled",
        ));
    }
    if config.retries.max_delay_ms > 0 && config.retries.max_delay_ms < config.retries.base_delay_ms {
        errors.push(ValidationError::new(
            "retries.max_delay_ms",
            "must not be smaller than retries.base_delay_ms",
        ));
    }
    if !LOG_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }
    if !LOG_FORMATS.contains(&config.observability.log_format.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_format",
            format!("unknown format '{}'", config.observability.log_format),
        ));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address '{}'", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
