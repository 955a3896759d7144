//! RPC adapter subsystem.
//!
//! # Data Flow
//! ```text
//! Orchestrator (Unix socket, JSON)
//!     → server.rs (axum routes, tracing, request deadline)
//!     → adapter.rs (decode string fields → MountPipeline)
//!     → contract.rs (MountResponse / VersionResponse)
//! ```
//!
//! # Design Decisions
//! - The pipeline never sees the transport; [`TransportAdapter`] is the seam
//! - Failures travel in the response body with a stable code, and the
//!   HTTP status mirrors the code

pub mod adapter;
pub mod contract;
pub mod server;

pub use adapter::{AdapterError, ProviderAdapter, TransportAdapter};
pub use contract::{MountRequest, MountResponse, RpcError, VersionResponse};
pub use server::ProviderServer;
