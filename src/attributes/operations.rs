//! Derivation of retrieval operations from validated attributes.

use std::fmt;

use crate::attributes::model::Attributes;
use crate::attributes::validation::{extension_of, AttributeError};

/// Where artifacts are fetched from; shared by every operation of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub server_address: String,
    pub application: String,
    pub profile: String,
}

impl ConfigSource {
    /// Server address without trailing slashes, ready for path joining.
    pub fn base_url(&self) -> &str {
        self.server_address.trim_end_matches('/')
    }
}

/// One unit of work of a mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOperation {
    /// Server-rendered file in the requested format.
    Typed { file_type: String, file_name: String },
    /// File passed through verbatim.
    Raw {
        index: usize,
        source: String,
        target: String,
    },
}

impl RetrievalOperation {
    /// Name of the file this operation writes, relative to the target path.
    pub fn file_name(&self) -> &str {
        match self {
            RetrievalOperation::Typed { file_name, .. } => file_name,
            RetrievalOperation::Raw { target, .. } => target,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RetrievalOperation::Typed { .. } => "typed",
            RetrievalOperation::Raw { .. } => "raw",
        }
    }
}

impl fmt::Display for RetrievalOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalOperation::Typed { file_name, .. } => write!(f, "typed file {file_name}"),
            RetrievalOperation::Raw {
                index,
                source,
                target,
            } => write!(f, "raw file #{index} ({source} -> {target})"),
        }
    }
}

/// Everything a mount needs to do, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPlan {
    pub source: ConfigSource,
    pub operations: Vec<RetrievalOperation>,
}

impl Attributes {
    /// Validate, then derive the ordered operation list.
    pub fn plan(&self) -> Result<MountPlan, AttributeError> {
        self.validate()?;

        let mut operations = Vec::with_capacity(self.raw.len() + 1);

        if !self.file_type.is_empty() {
            operations.push(RetrievalOperation::Typed {
                file_type: self.file_type.clone(),
                file_name: format!("{}-{}.{}", self.application, self.profile, self.file_type),
            });
        } else if !self.file_name.is_empty() {
            operations.push(RetrievalOperation::Typed {
                file_type: extension_of(&self.file_name)?.to_string(),
                file_name: self.file_name.clone(),
            });
        }

        operations.extend(self.raw.iter().enumerate().map(|(index, item)| {
            RetrievalOperation::Raw {
                index,
                source: item.source.clone(),
                target: item.target.clone(),
            }
        }));

        Ok(MountPlan {
            source: ConfigSource {
                server_address: self.server_address.clone(),
                application: self.application.clone(),
                profile: self.profile.clone(),
            },
            operations,
        })
    }
}
