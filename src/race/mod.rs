//! Race subsystem.
//!
//! # Data Flow
//! ```text
//! perform_operation(id)
//!     → coordinator.rs (fresh SharedState + Budget, spawn two loops)
//!     → resilience::retries (one RetryLoop per source)
//!         ↔ state.rs (attempt counter, peer-failed flag)
//!     → first terminal OperationResult (result.rs)
//!     → loser aborted, task set dropped
//! ```
//!
//! # Design Decisions
//! - A single source failure is not decisive; only the second one is
//! - Sources are interchangeable once successful, no preference on ties
//! - Every path ends in an `OperationResult`; nothing is thrown to the caller

pub mod coordinator;
pub mod result;
pub mod state;

pub use coordinator::RaceCoordinator;
pub use result::OperationResult;
pub use state::SharedState;
