//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI flag overrides (binaries)
//!     → ProviderConfig (validated, immutable)
//!     → turned into the shared client + backoff policy at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProviderConfig;
pub use schema::RetryConfig;
pub use schema::ServerConfig;
