//! Attribute validation.
//!
//! Checks run in a fixed order and the first failure is reported:
//! raw entries, `serverAddress`, `application`, `profile`, presence of
//! something to mount, the explicit file name's extension, then path
//! safety of every value that ends up in a request URL or an output name.

use std::path::{Component, Path};

use thiserror::Error;

use crate::attributes::model::Attributes;
use crate::error::ErrorCode;

/// Extensions the config server can render a typed file as.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["json", "properties", "yaml", "yml"];

/// Errors raised while decoding or validating attributes.
#[derive(Debug, Error)]
pub enum AttributeError {
    #[error("failed to unmarshal {field}: {source}")]
    Malformed {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("source or target not set for raw file on index {index}")]
    InvalidRawMapping { index: usize },

    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("fileType, fileName and raw are not set, at least one is required")]
    NothingToMount,

    #[error("unsupported extension for file {file}, supported extensions are {supported}")]
    UnsupportedExtension { file: String, supported: String },

    #[error("file name {name} must be a relative path inside the target directory")]
    UnsafeFileName { name: String },

    #[error("{field} {value} must be a single path segment")]
    UnsafeSegment { field: &'static str, value: String },
}

impl AttributeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AttributeError::Malformed { .. } => ErrorCode::MalformedInput,
            AttributeError::UnsupportedExtension { .. } => ErrorCode::UnsupportedExtension,
            AttributeError::InvalidRawMapping { .. }
            | AttributeError::Missing(_)
            | AttributeError::NothingToMount
            | AttributeError::UnsafeFileName { .. }
            | AttributeError::UnsafeSegment { .. } => ErrorCode::ValidationError,
        }
    }
}

impl Attributes {
    /// Enforce the attribute invariants.
    pub fn validate(&self) -> Result<(), AttributeError> {
        for (index, item) in self.raw.iter().enumerate() {
            if item.source.is_empty() || item.target.is_empty() {
                return Err(AttributeError::InvalidRawMapping { index });
            }
        }

        if self.server_address.is_empty() {
            return Err(AttributeError::Missing("serverAddress"));
        }
        if self.application.is_empty() {
            return Err(AttributeError::Missing("application"));
        }
        if self.profile.is_empty() {
            return Err(AttributeError::Missing("profile"));
        }

        if self.file_type.is_empty() && self.file_name.is_empty() && self.raw.is_empty() {
            return Err(AttributeError::NothingToMount);
        }

        // fileType takes precedence, so fileName is only checked when it is used.
        let uses_file_name = self.file_type.is_empty() && !self.file_name.is_empty();
        if uses_file_name {
            extension_of(&self.file_name)?;
        }

        // These become both a URL path segment and part of the typed file name.
        ensure_segment("application", &self.application)?;
        ensure_segment("profile", &self.profile)?;
        if !self.file_type.is_empty() {
            ensure_segment("fileType", &self.file_type)?;
        }
        if uses_file_name {
            ensure_contained(&self.file_name)?;
        }
        for item in &self.raw {
            ensure_relative(&item.source)?;
            ensure_contained(&item.target)?;
        }

        Ok(())
    }
}

/// The recognized extension of `file_name`, without the dot.
pub(crate) fn extension_of(file_name: &str) -> Result<&str, AttributeError> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| SUPPORTED_EXTENSIONS.contains(ext))
        .ok_or_else(|| AttributeError::UnsupportedExtension {
            file: file_name.to_string(),
            supported: SUPPORTED_EXTENSIONS
                .iter()
                .map(|ext| format!(".{ext}"))
                .collect::<Vec<_>>()
                .join(", "),
        })
}

fn ensure_segment(field: &'static str, value: &str) -> Result<(), AttributeError> {
    let mut components = Path::new(value).components();
    let single = matches!(components.next(), Some(Component::Normal(_)))
        && components.next().is_none()
        && !value.contains(['/', '\\']);
    if single {
        Ok(())
    } else {
        Err(AttributeError::UnsafeSegment {
            field,
            value: value.to_string(),
        })
    }
}

/// Raw sources may name subdirectories on the server but never climb out.
fn ensure_relative(source: &str) -> Result<(), AttributeError> {
    if Path::new(source)
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(AttributeError::UnsafeFileName {
            name: source.to_string(),
        });
    }
    Ok(())
}

fn ensure_contained(name: &str) -> Result<(), AttributeError> {
    let path = Path::new(name);
    let contained = path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)));
    if contained {
        Ok(())
    } else {
        Err(AttributeError::UnsafeFileName {
            name: name.to_string(),
        })
    }
}
