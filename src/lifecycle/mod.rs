//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build client + adapter → Bind socket
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain in-flight mounts → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then client, then listener
//! - Ordered shutdown: stop accept, drain, remove socket

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
