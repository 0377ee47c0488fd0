//! Race coordinator.
//!
//! # Responsibilities
//! - Start one retry loop per source against a shared budget
//! - Return the first terminal result
//! - Abort the losing loop so nothing keeps polling after the answer
//! - Map task failures to an operation failure
//!
//! # Design Decisions
//! - Shared state and the task set are created per call, never reused
//! - Dropping the `perform_operation` future aborts both loops

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::schema::{OperationConfig, DEFAULT_BUDGET_MS};
use crate::observability::metrics;
use crate::race::{OperationResult, SharedState};
use crate::resilience::retries::RetryLoop;
use crate::resilience::timeouts::Budget;
use crate::source::StatusSource;

/// Races two redundant status sources.
#[derive(Clone)]
pub struct RaceCoordinator {
    primary: Arc<dyn StatusSource>,
    secondary: Arc<dyn StatusSource>,
    budget: Duration,
}

impl RaceCoordinator {
    /// Create a coordinator with the default 15s budget.
    pub fn new(primary: Arc<dyn StatusSource>, secondary: Arc<dyn StatusSource>) -> Self {
        Self {
            primary,
            secondary,
            budget: Duration::from_millis(DEFAULT_BUDGET_MS),
        }
    }

    pub fn from_config(
        config: &OperationConfig,
        primary: Arc<dyn StatusSource>,
        secondary: Arc<dyn StatusSource>,
    ) -> Self {
        Self::new(primary, secondary).with_budget(config.budget())
    }

    /// Override the operation budget.
    pub fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    #[cfg(test)]
    fn budget(&self) -> Duration {
        self.budget
    }

    /// Ask both sources for the status of `application_id`.
    ///
    /// Always returns within the budget plus one in-flight attempt.
    pub async fn perform_operation(&self, application_id: &str) -> OperationResult {
        let span = tracing::info_span!(
            "operation",
            operation_id = %Uuid::new_v4(),
            application_id = %application_id
        );
        self.race(application_id).instrument(span).await
    }

    async fn race(&self, application_id: &str) -> OperationResult {
        let started = Instant::now();
        let budget = Budget::starting_at(started, self.budget);
        let state = Arc::new(SharedState::new());
        let mut loops = JoinSet::new();

        for source in [&self.primary, &self.secondary] {
            let retry_loop = RetryLoop::new(Arc::clone(source), budget, Arc::clone(&state));
            let id = application_id.to_string();
            loops.spawn(async move { retry_loop.run(&id).await }.in_current_span());
        }

        let result = loop {
            match loops.join_next().await {
                Some(Ok(result)) => break result,
                Some(Err(e)) => {
                    tracing::error!(error = %e, "Retry loop task failed");
                }
                None => {
                    break OperationResult::Failure {
                        elapsed: None,
                        attempts: state.attempts(),
                    }
                }
            }
        };
        loops.abort_all();

        let duration = started.elapsed();
        metrics::record_operation(&result, duration);
        match &result {
            OperationResult::Success { status, .. } => tracing::info!(
                status = %status,
                attempts = state.attempts(),
                elapsed_ms = duration.as_millis() as u64,
                "Operation succeeded"
            ),
            OperationResult::Failure { attempts, .. } => tracing::warn!(
                attempts,
                elapsed_ms = duration.as_millis() as u64,
                "Operation failed"
            ),
        }

        result
    }
}

impl std::fmt::Debug for RaceCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaceCoordinator")
            .field("primary", &self.primary.name())
            .field("secondary", &self.secondary.name())
            .field("budget", &self.budget)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ScriptStep;
    use crate::source::ScriptedSource;

    #[test]
    fn test_from_config_budget() {
        let source: Arc<dyn StatusSource> = Arc::new(ScriptedSource::new(
            "a",
            vec![ScriptStep::Failure {
                message: "down".into(),
            }],
        ));
        let config = OperationConfig { budget_ms: 2500 };

        let coordinator = RaceCoordinator::from_config(&config, source.clone(), source);
        assert_eq!(coordinator.budget(), Duration::from_millis(2500));
    }

    #[test]
    fn test_default_budget() {
        let source: Arc<dyn StatusSource> = Arc::new(ScriptedSource::new("a", Vec::new()));
        let coordinator = RaceCoordinator::new(source.clone(), source);
        assert_eq!(coordinator.budget(), Duration::from_secs(15));
    }
}
