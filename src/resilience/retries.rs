//! Retry loop for a single source.
//!
//! # States
//! - Polling: issue attempts until success, failure, or budget expiry
//! - LocalFailed: this source failed; decide whether the operation has failed
//! - Done: a terminal result was produced
//!
//! # State Transitions
//! ```text
//! Polling → Polling:     RetryAfter{delay} (sleep delay, clamped to deadline)
//! Polling → Done:        Success, or budget expired
//! Polling → LocalFailed: Failure
//! LocalFailed → Done:    peer already failed (report now),
//!                        or budget expired while waiting on the peer
//! ```
//!
//! # Design Decisions
//! - The backoff comes from the source; there is no local backoff schedule
//! - The first loop to fail parks on a timer until the deadline; the
//!   coordinator aborts it if the peer resolves the operation first
//! - Every suspension point is an `.await`, so task abort interrupts it

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};

use crate::observability::metrics;
use crate::race::{OperationResult, SharedState};
use crate::resilience::timeouts::Budget;
use crate::source::{SourceResponse, StatusSource};

/// Drives repeated attempts against one source.
pub struct RetryLoop {
    source: Arc<dyn StatusSource>,
    budget: Budget,
    state: Arc<SharedState>,
}

impl RetryLoop {
    pub fn new(source: Arc<dyn StatusSource>, budget: Budget, state: Arc<SharedState>) -> Self {
        Self {
            source,
            budget,
            state,
        }
    }

    /// Run until a terminal result.
    pub async fn run(&self, application_id: &str) -> OperationResult {
        let source = self.source.name();
        let mut first_attempt_at: Option<Instant> = None;

        while !self.budget.is_expired() {
            let issued_at = Instant::now();
            let first = *first_attempt_at.get_or_insert(issued_at);
            let attempt = self.state.record_attempt();

            let response = self.source.attempt(application_id).await;
            metrics::record_attempt(source, &response);

            match response {
                SourceResponse::Success {
                    application_id,
                    status,
                } => {
                    tracing::debug!(
                        source = %source,
                        attempt,
                        status = %status,
                        "Source answered"
                    );
                    return OperationResult::Success {
                        application_id,
                        status,
                    };
                }
                SourceResponse::RetryAfter { delay } => {
                    tracing::debug!(
                        source = %source,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "Source asked to retry later"
                    );
                    sleep_until(self.budget.wake_after(delay)).await;
                }
                SourceResponse::Failure { cause } => {
                    tracing::warn!(source = %source, attempt, error = %cause, "Source failed");
                    return self.local_failure(first.elapsed()).await;
                }
            }
        }

        let elapsed = first_attempt_at.map(|first| first.elapsed());
        let attempts = self.state.attempts();
        tracing::warn!(
            source = %source,
            attempts,
            budget_ms = self.budget.limit().as_millis() as u64,
            "Budget exhausted"
        );
        OperationResult::Failure { elapsed, attempts }
    }

    async fn local_failure(&self, elapsed: Duration) -> OperationResult {
        let source = self.source.name();

        if self.state.register_failure() {
            let attempts = self.state.attempts();
            tracing::info!(source = %source, attempts, "Both sources failed");
            return OperationResult::Failure {
                elapsed: Some(elapsed),
                attempts,
            };
        }

        tracing::debug!(
            source = %source,
            remaining_ms = self.budget.remaining().as_millis() as u64,
            "First source to fail, waiting on peer"
        );
        sleep_until(self.budget.deadline()).await;

        OperationResult::Failure {
            elapsed: Some(elapsed),
            attempts: self.state.attempts(),
        }
    }
}
