//! Application status racing library.
//!
//! Asks two redundant, unreliable sources for the status of an application,
//! retries as each source requests, and returns the first definitive answer
//! within a fixed wall-clock budget.

pub mod config;
pub mod observability;
pub mod race;
pub mod resilience;
pub mod source;

pub use config::StatusConfig;
pub use race::{OperationResult, RaceCoordinator};
pub use source::{SourceError, SourceResponse, StatusSource};
