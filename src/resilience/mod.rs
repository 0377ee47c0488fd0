//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Attempt against one source:
//!     → timeouts.rs (is the shared budget still open?)
//!     → source attempt
//!     → retries.rs (RetryAfter: back off as told; Failure: consult peer state)
//! ```
//!
//! # Design Decisions
//! - The budget is non-negotiable; every wait ends at the deadline at the latest
//! - Backoff is dictated by the source, never invented locally
//! - All waits are timer-based, never spin loops

pub mod retries;
pub mod timeouts;

pub use retries::RetryLoop;
pub use timeouts::Budget;
