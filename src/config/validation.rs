//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (budget > 0, retry delays > 0)
//! - Check that both sources have something to answer with
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: StatusConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{ScriptStep, SourceScriptConfig, StatusConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("operation.budget_ms must be greater than zero")]
    ZeroBudget,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("source '{role}' has an empty name")]
    EmptySourceName { role: &'static str },

    #[error("source '{source_name}' has no scripted steps")]
    EmptyScript { source_name: String },

    #[error("source '{source_name}' step {step}: retry_after delay_ms must be greater than zero")]
    ZeroRetryDelay { source_name: String, step: usize },
}

/// Check a parsed configuration.
pub fn validate_config(config: &StatusConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.operation.budget_ms == 0 {
        errors.push(ValidationError::ZeroBudget);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    validate_source("primary", &config.sources.primary, &mut errors);
    validate_source("secondary", &config.sources.secondary, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_source(role: &'static str, source: &SourceScriptConfig, errors: &mut Vec<ValidationError>) {
    if source.name.trim().is_empty() {
        errors.push(ValidationError::EmptySourceName { role });
    }

    if source.steps.is_empty() {
        errors.push(ValidationError::EmptyScript {
            source_name: source.name.clone(),
        });
    }

    for (step, entry) in source.steps.iter().enumerate() {
        if let ScriptStep::RetryAfter { delay_ms: 0 } = entry {
            errors.push(ValidationError::ZeroRetryDelay {
                source_name: source.name.clone(),
                step,
            });
        }
    }
}
