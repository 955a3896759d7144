//! Wire shapes of the orchestrator's provider contract.
//!
//! Field names follow the orchestrator's `v1alpha1` provider API; every
//! request field is a string the adapter decodes itself.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::mount::ObjectVersion;

/// Provider API version implemented here.
pub const API_VERSION: &str = "v1alpha1";

/// Runtime name reported by `Version`.
pub const RUNTIME_NAME: &str = "springcloudconfigprovider";

/// Inbound `Mount` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MountRequest {
    /// JSON object of attribute strings.
    pub attributes: String,
    /// JSON object of node-publish secrets; decoded but unused.
    pub secrets: String,
    /// Directory the files are written to.
    pub target_path: String,
    /// JSON number: the file mode in decimal (e.g. `"420"` for 0644).
    pub permission: String,
}

/// Failure detail attached to a [`MountResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: ErrorCode,
    pub message: String,
}

/// Outbound `Mount` result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountResponse {
    #[serde(default)]
    pub object_version: Vec<ObjectVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl MountResponse {
    pub fn success(object_version: Vec<ObjectVersion>) -> Self {
        Self {
            object_version,
            error: None,
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            object_version: Vec::new(),
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outbound `Version` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub version: String,
    pub runtime_name: String,
    pub runtime_version: String,
}

impl Default for VersionResponse {
    fn default() -> Self {
        Self {
            version: API_VERSION.to_string(),
            runtime_name: RUNTIME_NAME.to_string(),
            runtime_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let request: MountRequest = serde_json::from_str(
            r#"{"attributes":"{}","secrets":"{}","targetPath":"/mnt","permission":"420"}"#,
        )
        .unwrap();
        assert_eq!(request.target_path, "/mnt");
        assert_eq!(request.permission, "420");
    }

    #[test]
    fn test_failure_response_shape() {
        let response = MountResponse::failure(ErrorCode::MissingTargetPath, "missing target path");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "objectVersion": [],
                "error": {"code": "MissingTargetPath", "message": "missing target path"}
            })
        );
    }

    #[test]
    fn test_version_identity() {
        let version = VersionResponse::default();
        assert_eq!(version.version, "v1alpha1");
        assert_eq!(version.runtime_name, "springcloudconfigprovider");
        assert_eq!(version.runtime_version, env!("CARGO_PKG_VERSION"));
    }
}
