//! Config retrieval subsystem.
//!
//! # Data Flow
//! ```text
//! RetrievalOperation + ConfigSource
//!     → spring.rs (build URL, GET with retry/backoff)
//!     → response body bytes
//! ```
//!
//! # Design Decisions
//! - The pipeline only sees the [`ConfigClient`] trait; tests plug in fakes
//! - 5xx and transport errors are retryable, any other non-2xx is final
//! - The client is built once at startup and shared immutably

use std::future::Future;

use thiserror::Error;

use crate::attributes::ConfigSource;

pub mod spring;

pub use spring::SpringConfigClient;

/// Errors returned by config retrieval.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The server address does not form a valid URL.
    #[error("invalid config server url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The server answered with a non-success status.
    #[error("received {status} instead of 200 while calling {url}")]
    Status { status: u16, url: String },

    /// The request never produced a complete response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl RetrievalError {
    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RetrievalError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            RetrievalError::InvalidUrl { url, .. }
            | RetrievalError::Status { url, .. }
            | RetrievalError::Transport { url, .. } => url,
        }
    }
}

/// Source of configuration artifacts.
pub trait ConfigClient: Send + Sync {
    /// Fetch a config rendered by the server in `file_type` format.
    fn get_config(
        &self,
        source: &ConfigSource,
        file_type: &str,
    ) -> impl Future<Output = Result<Vec<u8>, RetrievalError>> + Send;

    /// Fetch the file at `path` verbatim, without server-side parsing.
    fn get_config_raw(
        &self,
        source: &ConfigSource,
        path: &str,
    ) -> impl Future<Output = Result<Vec<u8>, RetrievalError>> + Send;
}
