//! Attribute model subsystem.
//!
//! # Data Flow
//! ```text
//! attributes string (JSON object of strings)
//!     → model.rs (decode, then decode the embedded `raw` list)
//!     → validation.rs (required fields, raw entries, file names)
//!     → operations.rs (MountPlan: typed operation first, raw in order)
//! ```
//!
//! # Design Decisions
//! - The orchestrator delivers a flat string map, so `raw` is a JSON string
//! - Empty strings count as absent
//! - The first failing check wins; checks run in a fixed precedence
//! - Unknown attribute keys are ignored (the orchestrator injects its own)

pub mod model;
pub mod operations;
pub mod validation;

pub use model::{Attributes, RawMapping};
pub use operations::{ConfigSource, MountPlan, RetrievalOperation};
pub use validation::{AttributeError, SUPPORTED_EXTENSIONS};
