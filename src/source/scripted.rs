//! Scripted source that replays configured responses.
//!
//! # Responsibilities
//! - Stand in for a real backend in the CLI and in tests
//! - Answer attempts from a fixed script, in order
//! - Repeat the final step once the script is exhausted

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::schema::{ScriptStep, SourceScriptConfig};
use crate::source::{SourceError, SourceResponse, StatusSource};

/// A deterministic source driven by a list of [`ScriptStep`]s.
#[derive(Debug)]
pub struct ScriptedSource {
    name: String,
    steps: Vec<ScriptStep>,
    latency: Duration,
    /// Number of attempts answered so far.
    calls: AtomicUsize,
}

impl ScriptedSource {
    /// Create a source with no latency.
    pub fn new(name: impl Into<String>, steps: Vec<ScriptStep>) -> Self {
        Self {
            name: name.into(),
            steps,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build a source from its configuration block.
    pub fn from_config(config: &SourceScriptConfig) -> Self {
        Self::new(config.name.clone(), config.steps.clone())
            .with_latency(Duration::from_millis(config.latency_ms))
    }

    /// Delay every attempt by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of attempts answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn step_response(step: Option<&ScriptStep>, requested_id: &str) -> SourceResponse {
        match step {
            Some(ScriptStep::Success {
                application_id,
                status,
            }) => SourceResponse::Success {
                application_id: application_id
                    .clone()
                    .unwrap_or_else(|| requested_id.to_string()),
                status: status.clone(),
            },
            Some(ScriptStep::RetryAfter { delay_ms }) => SourceResponse::RetryAfter {
                delay: Duration::from_millis(*delay_ms),
            },
            Some(ScriptStep::Failure { message }) => SourceResponse::Failure {
                cause: SourceError::Backend(message.clone()),
            },
            None => SourceResponse::Failure {
                cause: SourceError::Backend("empty script".to_string()),
            },
        }
    }
}

#[async_trait]
impl StatusSource for ScriptedSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, application_id: &str) -> SourceResponse {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let step = self.steps.get(call).or_else(|| self.steps.last());
        Self::step_response(step, application_id)
    }
}
