//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a status race.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default wall-clock budget for one operation.
pub const DEFAULT_BUDGET_MS: u64 = 15_000;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct StatusConfig {
    /// Operation budget.
    pub operation: OperationConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// The two scripted sources raced by the CLI.
    pub sources: SourcesConfig,
}

/// Operation-wide settings shared by both sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OperationConfig {
    /// Total budget across both sources in milliseconds.
    pub budget_ms: u64,
}

impl OperationConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_millis(self.budget_ms)
    }
}

impl Default for OperationConfig {
    fn default() -> Self {
        Self {
            budget_ms: DEFAULT_BUDGET_MS,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Primary and secondary source definitions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub primary: SourceScriptConfig,
    pub secondary: SourceScriptConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            primary: SourceScriptConfig::named("primary"),
            secondary: SourceScriptConfig::named("secondary"),
        }
    }
}

/// A scripted source: the responses it gives, in order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceScriptConfig {
    /// Source identifier for logging/metrics.
    pub name: String,

    /// Fixed latency added to every attempt in milliseconds.
    #[serde(default)]
    pub latency_ms: u64,

    /// Responses in order; the last one repeats once the script runs out.
    #[serde(default)]
    pub steps: Vec<ScriptStep>,
}

impl SourceScriptConfig {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            latency_ms: 0,
            steps: Vec::new(),
        }
    }
}

/// One scripted response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptStep {
    Success {
        /// Defaults to the requested application id.
        #[serde(default)]
        application_id: Option<String>,
        status: String,
    },
    RetryAfter {
        delay_ms: u64,
    },
    Failure {
        #[serde(default = "default_failure_message")]
        message: String,
    },
}

fn default_failure_message() -> String {
    "scripted failure".to_string()
}
