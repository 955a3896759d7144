//! HTTP client for a Spring Cloud Config server.
//!
//! # Responsibilities
//! - Build typed (`/config/...`) and raw (`/springconfig/...`) URLs
//! - Issue GET requests with a per-attempt timeout
//! - Classify failures and hand them to the retry driver

use reqwest::Url;

use crate::attributes::ConfigSource;
use crate::client::{ConfigClient, RetrievalError};
use crate::config::{ClientConfig, RetryConfig};
use crate::observability::metrics;
use crate::resilience::{retry, Attempt, BackoffPolicy};

const CONFIG_PATH: &str = "/config/";
const RAW_CONFIG_PATH: &str = "/springconfig/";
const DEFAULT_BRANCH: &str = "master";

/// Retrying Spring Cloud Config client.
#[derive(Debug, Clone)]
pub struct SpringConfigClient {
    http: reqwest::Client,
    backoff: BackoffPolicy,
}

impl SpringConfigClient {
    /// Wrap an existing HTTP client.
    pub fn new(http: reqwest::Client, backoff: BackoffPolicy) -> Self {
        Self { http, backoff }
    }

    /// Build the client from configuration.
    pub fn from_config(client: &ClientConfig, retries: &RetryConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(client.timeout_secs))
            .user_agent(client.user_agent.clone())
            .build()?;
        Ok(Self::new(http, BackoffPolicy::from(retries)))
    }

    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// `{server}/config/{application}/{profile}.{file_type}`
    pub fn typed_url(source: &ConfigSource, file_type: &str) -> String {
        format!(
            "{}{}{}/{}.{}",
            source.base_url(),
            CONFIG_PATH,
            source.application,
            source.profile,
            file_type
        )
    }

    /// `{server}/springconfig/{application}/{profile}/master/{path}`
    pub fn raw_url(source: &ConfigSource, path: &str) -> String {
        format!(
            "{}{}{}/{}/{}/{}",
            source.base_url(),
            RAW_CONFIG_PATH,
            source.application,
            source.profile,
            DEFAULT_BRANCH,
            path.trim_start_matches('/')
        )
    }

    async fn fetch(&self, url: String, kind: &'static str) -> Result<Vec<u8>, RetrievalError> {
        let parsed = Url::parse(&url).map_err(|source| RetrievalError::InvalidUrl {
            url: url.clone(),
            source,
        })?;

        let target = &parsed;
        retry(&self.backoff, move |attempt| self.attempt(target, kind, attempt)).await
    }

    async fn attempt(
        &self,
        url: &Url,
        kind: &'static str,
        attempt: u32,
    ) -> Result<Vec<u8>, Attempt<RetrievalError>> {
        tracing::debug!(url = %url, attempt, kind, "Requesting config");

        let response = match self.http.get(url.clone()).send().await {
            Ok(response) => response,
            Err(source) => {
                metrics::record_fetch_attempt(kind, "transport_error");
                return Err(Attempt::Retryable(RetrievalError::Transport {
                    url: url.to_string(),
                    source,
                }));
            }
        };

        let status = response.status();
        if !status.is_success() {
            metrics::record_fetch_attempt(kind, "status_error");
            let err = RetrievalError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            };
            return Err(if status.is_server_error() {
                Attempt::Retryable(err)
            } else {
                Attempt::Permanent(err)
            });
        }

        let body = response.bytes().await.map_err(|source| {
            metrics::record_fetch_attempt(kind, "transport_error");
            Attempt::Retryable(RetrievalError::Transport {
                url: url.to_string(),
                source,
            })
        })?;

        metrics::record_fetch_attempt(kind, "success");
        Ok(body.to_vec())
    }
}

impl ConfigClient for SpringConfigClient {
    async fn get_config(
        &self,
        source: &ConfigSource,
        file_type: &str,
    ) -> Result<Vec<u8>, RetrievalError> {
        self.fetch(Self::typed_url(source, file_type), "typed").await
    }

    async fn get_config_raw(
        &self,
        source: &ConfigSource,
        path: &str,
    ) -> Result<Vec<u8>, RetrievalError> {
        self.fetch(Self::raw_url(source, path), "raw").await
    }
}
