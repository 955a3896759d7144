//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, one span per mount)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout / stderr, collected by the node's log agent
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Every mount carries a generated request ID in its span
//! - Attribute values are logged, secret contents never are

pub mod logging;
pub mod metrics;
