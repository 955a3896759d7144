//! Translation between the orchestrator contract and the mount pipeline.
//!
//! # Responsibilities
//! - Decode the string-encoded attributes, secrets and permission
//! - Run the pipeline with the decoded inputs
//! - Fold the outcome into a [`MountResponse`]

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use thiserror::Error;

use crate::attributes::{AttributeError, Attributes};
use crate::client::ConfigClient;
use crate::error::ErrorCode;
use crate::mount::{MountError, MountPipeline, MountResult};
use crate::rpc::contract::{MountRequest, MountResponse, VersionResponse};

/// A transport-independent handler for the provider contract.
pub trait TransportAdapter: Send + Sync {
    fn handle_mount(&self, request: MountRequest) -> impl Future<Output = MountResponse> + Send;

    fn handle_version(&self) -> VersionResponse;
}

/// Errors surfaced by the adapter.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to unmarshal {field}, error: {source}")]
    MalformedInput {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Attributes(#[from] AttributeError),

    #[error(transparent)]
    Mount(#[from] MountError),
}

impl AdapterError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdapterError::MalformedInput { .. } => ErrorCode::MalformedInput,
            AdapterError::Attributes(e) => e.code(),
            AdapterError::Mount(e) => e.code(),
        }
    }
}

/// Adapter backed by a [`MountPipeline`].
#[derive(Debug, Clone)]
pub struct ProviderAdapter<C> {
    pipeline: MountPipeline<C>,
}

impl<C: ConfigClient> ProviderAdapter<C> {
    pub fn new(pipeline: MountPipeline<C>) -> Self {
        Self { pipeline }
    }

    /// Decode `request` and mount it.
    pub async fn mount(&self, request: &MountRequest) -> Result<MountResult, AdapterError> {
        let attributes = Attributes::parse(&request.attributes)?;
        decode_secrets(&request.secrets)?;
        let permission = decode_permission(&request.permission)?;

        let result = self
            .pipeline
            .mount(&attributes, Path::new(&request.target_path), permission)
            .await?;
        Ok(result)
    }
}

impl<C: ConfigClient> TransportAdapter for ProviderAdapter<C> {
    async fn handle_mount(&self, request: MountRequest) -> MountResponse {
        match self.mount(&request).await {
            Ok(result) => MountResponse::success(result.object_versions),
            Err(e) => MountResponse::failure(e.code(), e.to_string()),
        }
    }

    fn handle_version(&self) -> VersionResponse {
        VersionResponse::default()
    }
}

/// Secrets are accepted for contract compatibility; an empty string means none.
fn decode_secrets(input: &str) -> Result<HashMap<String, String>, AdapterError> {
    if input.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(input).map_err(|source| AdapterError::MalformedInput {
        field: "secrets",
        source,
    })
}

fn decode_permission(input: &str) -> Result<u32, AdapterError> {
    serde_json::from_str(input).map_err(|source| AdapterError::MalformedInput {
        field: "file permission",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::ConfigSource;
    use crate::client::RetrievalError;

    struct StaticClient;

    impl ConfigClient for StaticClient {
        async fn get_config(
            &self,
            _source: &ConfigSource,
            _file_type: &str,
        ) -> Result<Vec<u8>, RetrievalError> {
            Ok(br#"{"some":"json"}"#.to_vec())
        }

        async fn get_config_raw(
            &self,
            _source: &ConfigSource,
            path: &str,
        ) -> Result<Vec<u8>, RetrievalError> {
            Ok(format!("content of {path}").into_bytes())
        }
    }

    fn adapter() -> ProviderAdapter<StaticClient> {
        ProviderAdapter::new(MountPipeline::new(StaticClient))
    }

    fn request(target_path: &str) -> MountRequest {
        MountRequest {
            attributes: r#"{"serverAddress":"http://example.com/","application":"some","profile":"testing","fileType":"json"}"#.to_string(),
            secrets: r#"{"some":"json"}"#.to_string(),
            target_path: target_path.to_string(),
            permission: "420".to_string(),
        }
    }

    #[tokio::test]
    async fn test_mount_success() {
        let dir = tempfile::tempdir().unwrap();
        let response = adapter()
            .handle_mount(request(dir.path().to_str().unwrap()))
            .await;

        assert!(response.is_success(), "{:?}", response.error);
        assert_eq!(response.object_version.len(), 1);
        assert_eq!(response.object_version[0].id, "some");
        assert_eq!(response.object_version[0].version, "testing");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("some-testing.json")).unwrap(),
            r#"{"some":"json"}"#
        );
    }

    #[tokio::test]
    async fn test_missing_target_path() {
        let response = adapter().handle_mount(request("")).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, ErrorCode::MissingTargetPath);
        assert_eq!(error.message, "missing target path");
    }

    #[tokio::test]
    async fn test_malformed_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().to_str().unwrap();

        let mut bad_attributes = request(target);
        bad_attributes.attributes = "{".to_string();
        let mut bad_secrets = request(target);
        bad_secrets.secrets = "[1, 2]".to_string();
        let mut bad_permission = request(target);
        bad_permission.permission = "rw-r--r--".to_string();

        for req in [bad_attributes, bad_secrets, bad_permission] {
            let response = adapter().handle_mount(req).await;
            assert_eq!(response.error.unwrap().code, ErrorCode::MalformedInput);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_secrets_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path().to_str().unwrap());
        req.secrets = String::new();
        assert!(adapter().handle_mount(req).await.is_success());
    }

    #[tokio::test]
    async fn test_permission_is_decimal_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path().to_str().unwrap());
        req.permission = "384".to_string(); // 0o600
        assert!(adapter().handle_mount(req).await.is_success());

        let mode = std::fs::metadata(dir.path().join("some-testing.json"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn test_validation_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let mut req = request(dir.path().to_str().unwrap());
        req.attributes =
            r#"{"serverAddress":"http://example.com/","profile":"testing","application":"some"}"#
                .to_string();
        let error = adapter().handle_mount(req).await.error.unwrap();
        assert_eq!(error.code, ErrorCode::ValidationError);
        assert_eq!(
            error.message,
            "fileType, fileName and raw are not set, at least one is required"
        );
    }

    #[test]
    fn test_version() {
        assert_eq!(adapter().handle_version().runtime_name, "springcloudconfigprovider");
    }
}
