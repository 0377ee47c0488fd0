//! Status source subsystem.
//!
//! # Data Flow
//! ```text
//! RetryLoop
//!     → StatusSource::attempt(application_id)
//!         - scripted.rs (replays configured responses)
//!         - blocking.rs (wraps a synchronous client call)
//!     → SourceResponse (Success | RetryAfter | Failure)
//! ```
//!
//! # Design Decisions
//! - A source answers one attempt at a time; retry policy lives above it
//! - Transport and decoding belong to the source, never to the race
//! - Failures are values, not errors: an attempt always yields a response

pub mod blocking;
pub mod scripted;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use blocking::BlockingSource;
pub use scripted::ScriptedSource;

/// Why a single attempt against a source failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The backend reported a failure.
    #[error("backend failure: {0}")]
    Backend(String),

    /// The task running a blocking attempt panicked or was cancelled.
    #[error("attempt task failed: {0}")]
    Task(String),
}

/// Outcome of one attempt against a single source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceResponse {
    /// Authoritative answer.
    Success {
        application_id: String,
        status: String,
    },
    /// Transient condition; wait `delay` before asking this source again.
    RetryAfter { delay: Duration },
    /// This attempt failed.
    Failure { cause: SourceError },
}

impl SourceResponse {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SourceResponse::Success { .. } => "success",
            SourceResponse::RetryAfter { .. } => "retry_after",
            SourceResponse::Failure { .. } => "failure",
        }
    }
}

/// A backend able to answer "what is the status of application X?".
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Name used in logs and metric labels.
    fn name(&self) -> &str;

    /// Perform one attempt.
    async fn attempt(&self, application_id: &str) -> SourceResponse;
}
