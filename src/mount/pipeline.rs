//! Mount orchestration.
//!
//! # Responsibilities
//! - Validate attributes and derive the plan
//! - Fetch and write each artifact strictly in order
//! - Stop at the first failure and report it unchanged

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::Instrument;
use uuid::Uuid;

use crate::attributes::{Attributes, ConfigSource, RetrievalOperation};
use crate::client::ConfigClient;
use crate::mount::writer::write_artifact;
use crate::mount::{MountError, MountResult, MountStage, ObjectVersion};
use crate::observability::metrics;

/// Validates, fetches and writes the artifacts of one mount request.
#[derive(Debug, Clone)]
pub struct MountPipeline<C> {
    client: C,
}

impl<C: ConfigClient> MountPipeline<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Mount everything `attributes` describe into `target_path`.
    pub async fn mount(
        &self,
        attributes: &Attributes,
        target_path: &Path,
        permission: u32,
    ) -> Result<MountResult, MountError> {
        let span = tracing::info_span!(
            "mount",
            request_id = %Uuid::new_v4(),
            pod = %format!("{}/{}", attributes.pod_namespace, attributes.pod_name),
            application = %attributes.application,
            profile = %attributes.profile,
        );
        let started = Instant::now();

        let result = self
            .run(attributes, target_path, permission)
            .instrument(span.clone())
            .await;

        span.in_scope(|| match &result {
            Ok(_) => metrics::record_mount("success", started),
            Err(e) => {
                tracing::error!(
                    stage = %MountStage::Failed,
                    failed_at = %e.stage(),
                    code = %e.code(),
                    error = %e,
                    "Mount failed"
                );
                metrics::record_mount(e.code().as_str(), started);
            }
        });
        result
    }

    async fn run(
        &self,
        attributes: &Attributes,
        target_path: &Path,
        permission: u32,
    ) -> Result<MountResult, MountError> {
        tracing::debug!(stage = %MountStage::Validating, "Validating attributes");
        if target_path.as_os_str().is_empty() {
            return Err(MountError::MissingTargetPath);
        }
        let plan = attributes.plan()?;

        tracing::info!(
            target_path = %target_path.display(),
            operations = plan.operations.len(),
            "Mounting secrets store object content"
        );

        let mut result = MountResult::default();
        for operation in &plan.operations {
            let content = self.fetch(&plan.source, operation).await?;
            let path = self
                .write(target_path, operation, &content, permission)
                .await?;
            result.files.push(path);
            result.object_versions.push(object_version(&plan.source, operation));
        }

        tracing::info!(
            stage = %MountStage::Done,
            files = result.files.len(),
            mount_point = %target_path.display(),
            "Mount complete"
        );
        Ok(result)
    }

    async fn fetch(
        &self,
        source: &ConfigSource,
        operation: &RetrievalOperation,
    ) -> Result<Vec<u8>, MountError> {
        tracing::debug!(stage = %MountStage::Fetching, %operation, "Fetching artifact");

        let content = match operation {
            RetrievalOperation::Typed { file_type, .. } => {
                self.client.get_config(source, file_type).await
            }
            RetrievalOperation::Raw { source: path, .. } => {
                self.client.get_config_raw(source, path).await
            }
        };

        content.map_err(|source| MountError::RetrievalFailed {
            operation: operation.clone(),
            source,
        })
    }

    async fn write(
        &self,
        target_path: &Path,
        operation: &RetrievalOperation,
        content: &[u8],
        permission: u32,
    ) -> Result<PathBuf, MountError> {
        tracing::debug!(
            stage = %MountStage::Writing,
            %operation,
            bytes = content.len(),
            "Writing artifact"
        );

        let path = write_artifact(target_path, operation.file_name(), content, permission)
            .await
            .map_err(|source| MountError::FileWriteFailed {
                operation: operation.clone(),
                target_path: target_path.to_path_buf(),
                source,
            })?;

        metrics::record_file_written();
        tracing::info!(file = %operation.file_name(), kind = operation.kind(), "Mounted file");
        Ok(path)
    }
}

fn object_version(source: &ConfigSource, operation: &RetrievalOperation) -> ObjectVersion {
    let id = match operation {
        RetrievalOperation::Typed { .. } => source.application.clone(),
        RetrievalOperation::Raw { source: path, .. } => format!("{}/{}", source.application, path),
    };
    ObjectVersion {
        id,
        version: source.profile.clone(),
    }
}
