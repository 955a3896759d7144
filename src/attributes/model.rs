//! Attribute decoding.

use serde::{Deserialize, Serialize};

use crate::attributes::validation::AttributeError;

/// One raw file: fetched verbatim from `source`, written as `target`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMapping {
    pub source: String,
    pub target: String,
}

impl RawMapping {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Declarative description of one mount request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub server_address: String,
    pub application: String,
    pub profile: String,
    pub file_type: String,
    pub file_name: String,
    pub raw: Vec<RawMapping>,
    pub pod_name: String,
    pub pod_namespace: String,
}

/// Shape of the attribute map as the orchestrator sends it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AttributesWire {
    server_address: String,
    application: String,
    profile: String,
    file_type: String,
    file_name: String,
    raw: String,
    #[serde(rename = "csi.storage.k8s.io/pod.name")]
    pod_name: String,
    #[serde(rename = "csi.storage.k8s.io/pod.namespace")]
    pod_namespace: String,
}

impl Attributes {
    /// Decode the attribute JSON object, then the `raw` list embedded in it.
    pub fn parse(input: &str) -> Result<Self, AttributeError> {
        let wire: AttributesWire =
            serde_json::from_str(input).map_err(|source| AttributeError::Malformed {
                field: "attributes",
                source,
            })?;

        let raw = if wire.raw.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&wire.raw).map_err(|source| AttributeError::Malformed {
                field: "raw",
                source,
            })?
        };

        Ok(Self {
            server_address: wire.server_address,
            application: wire.application,
            profile: wire.profile,
            file_type: wire.file_type,
            file_name: wire.file_name,
            raw,
            pod_name: wire.pod_name,
            pod_namespace: wire.pod_namespace,
        })
    }

}
