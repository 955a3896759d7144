//! Mount pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! Attributes + target path + permission
//!     → Validating (attributes/, no I/O on failure)
//!     → Fetching   (client/, one operation at a time)
//!     → Writing    (writer.rs, truncate-and-write)
//!     → Done: MountResult { object versions, written files }
//!       or Failed: first MountError, remaining operations skipped
//! ```
//!
//! # Design Decisions
//! - Fail fast, no rollback: files written before a failure stay in place
//! - Operations never run concurrently within one request
//! - Errors keep the operation that failed (typed, or raw index)

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attributes::{AttributeError, RetrievalOperation};
use crate::client::RetrievalError;
use crate::error::ErrorCode;

pub mod pipeline;
pub mod writer;

pub use pipeline::MountPipeline;

/// Stages a mount moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountStage {
    Validating,
    Fetching,
    Writing,
    Done,
    Failed,
}

impl fmt::Display for MountStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MountStage::Validating => "validating",
            MountStage::Fetching => "fetching",
            MountStage::Writing => "writing",
            MountStage::Done => "done",
            MountStage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Identity of one mounted object, reported back to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectVersion {
    pub id: String,
    pub version: String,
}

/// Outcome of a successful mount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountResult {
    pub object_versions: Vec<ObjectVersion>,
    pub files: Vec<PathBuf>,
}

/// Errors that abort a mount.
#[derive(Debug, Error)]
pub enum MountError {
    #[error("missing target path")]
    MissingTargetPath,

    #[error(transparent)]
    Attributes(#[from] AttributeError),

    #[error("failed to retrieve secrets for {operation}: {source}")]
    RetrievalFailed {
        operation: RetrievalOperation,
        #[source]
        source: RetrievalError,
    },

    #[error("failed to mount {} at {}: {source}", .operation.file_name(), .target_path.display())]
    FileWriteFailed {
        operation: RetrievalOperation,
        target_path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MountError {
    pub fn code(&self) -> ErrorCode {
        match self {
            MountError::MissingTargetPath => ErrorCode::MissingTargetPath,
            MountError::Attributes(e) => e.code(),
            MountError::RetrievalFailed { .. } => ErrorCode::RetrievalFailed,
            MountError::FileWriteFailed { .. } => ErrorCode::FileWriteFailed,
        }
    }

    /// Stage the mount was in when it failed.
    pub fn stage(&self) -> MountStage {
        match self {
            MountError::MissingTargetPath | MountError::Attributes(_) => MountStage::Validating,
            MountError::RetrievalFailed { .. } => MountStage::Fetching,
            MountError::FileWriteFailed { .. } => MountStage::Writing,
        }
    }

    /// The operation that failed, if the mount got past validation.
    pub fn operation(&self) -> Option<&RetrievalOperation> {
        match self {
            MountError::RetrievalFailed { operation, .. }
            | MountError::FileWriteFailed { operation, .. } => Some(operation),
            _ => None,
        }
    }
}
