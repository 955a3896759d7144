//! Error codes shared across the provider.
//!
//! Every failure the orchestrator can observe maps onto one of these codes;
//! they are the stable `error.code` strings of the RPC response.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Attributes, secrets or permission could not be decoded.
    MalformedInput,
    /// A required attribute is missing or invalid.
    ValidationError,
    /// The requested file name has an extension the config server cannot render.
    UnsupportedExtension,
    /// The config server could not deliver an artifact.
    RetrievalFailed,
    /// Writing an artifact into the target path failed.
    FileWriteFailed,
    /// The request carried no target path.
    MissingTargetPath,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MalformedInput => "MalformedInput",
            ErrorCode::ValidationError => "ValidationError",
            ErrorCode::UnsupportedExtension => "UnsupportedExtension",
            ErrorCode::RetrievalFailed => "RetrievalFailed",
            ErrorCode::FileWriteFailed => "FileWriteFailed",
            ErrorCode::MissingTargetPath => "MissingTargetPath",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
