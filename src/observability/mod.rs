//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Retry loops and coordinator produce:
//!     → logging.rs (structured log events inside the operation span)
//!     → metrics.rs (attempt and operation counters, latency histogram)
//! ```
//!
//! # Design Decisions
//! - Every operation gets a span with a UUID operation id
//! - Structured fields (source, attempt, delay_ms) rather than formatted text
//! - JSON output for machines, pretty output for people

pub mod logging;
pub mod metrics;
