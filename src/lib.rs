//! Spring Cloud Config provider for the Secrets Store CSI driver.
//!
//! Fetches configuration files from a Spring Cloud Config server and writes
//! them into a pod's volume on behalf of the CSI driver.
//!
//! # Architecture Overview
//!
//! ```text
//!   CSI driver ──unix socket──▶ rpc::server ──▶ rpc::adapter
//!                                                  │ decode attributes,
//!                                                  │ secrets, permission
//!                                                  ▼
//!                                           mount::pipeline
//!                             ┌─────────────────┼──────────────────┐
//!                             ▼                 ▼                  ▼
//!                      attributes::      client::spring      mount::writer
//!                      validate/plan    (resilience::retry)   (target dir)
//!                                               │
//!                                               ▼
//!                                   Spring Cloud Config server
//! ```

pub mod attributes;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod mount;
pub mod observability;
pub mod resilience;
pub mod rpc;

pub use attributes::Attributes;
pub use client::{ConfigClient, SpringConfigClient};
pub use config::ProviderConfig;
pub use error::ErrorCode;
pub use lifecycle::Shutdown;
pub use mount::{MountError, MountPipeline, MountResult};
pub use rpc::{ProviderAdapter, ProviderServer, TransportAdapter};
