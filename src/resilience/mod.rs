//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Outbound GET to the config server:
//!     → retries.rs (classify failure, decide whether to try again)
//!     → backoff.rs (how long to wait before the next attempt)
//! ```
//!
//! # Design Decisions
//! - The policy is immutable configuration shared by every request
//! - Each retried call starts its delay sequence from attempt 1
//! - Connection errors and 5xx are retryable; 4xx never are

pub mod backoff;
pub mod retries;

pub use backoff::BackoffPolicy;
pub use retries::{retry, Attempt};
