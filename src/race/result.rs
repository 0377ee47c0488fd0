//! Operation result returned to callers.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Final answer of one `perform_operation` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OperationResult {
    Success {
        application_id: String,
        status: String,
    },
    Failure {
        /// Time from the reporting loop's first attempt to the failure.
        /// `None` when no attempt ever completed.
        #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
        elapsed: Option<Duration>,
        attempts: u32,
    },
}

impl OperationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, OperationResult::Success { .. })
    }

    /// Label used for metrics and logs.
    pub fn outcome(&self) -> &'static str {
        match self {
            OperationResult::Success { .. } => "success",
            OperationResult::Failure { .. } => "failure",
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationResult::Success {
                application_id,
                status,
            } => write!(f, "{}: {}", application_id, status),
            OperationResult::Failure {
                elapsed: Some(elapsed),
                attempts,
            } => write!(
                f,
                "failed after {} attempts in {}ms",
                attempts,
                elapsed.as_millis()
            ),
            OperationResult::Failure {
                elapsed: None,
                attempts,
            } => write!(f, "failed after {} attempts", attempts),
        }
    }
}

fn serialize_millis<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ok = OperationResult::Success {
            application_id: "app-1".into(),
            status: "APPROVED".into(),
        };
        assert_eq!(ok.to_string(), "app-1: APPROVED");
        assert!(ok.is_success());

        let failed = OperationResult::Failure {
            elapsed: Some(Duration::from_millis(1200)),
            attempts: 4,
        };
        assert_eq!(failed.to_string(), "failed after 4 attempts in 1200ms");
        assert_eq!(failed.outcome(), "failure");
    }

    #[test]
    fn test_json_shape() {
        let failed = OperationResult::Failure {
            elapsed: Some(Duration::from_millis(300)),
            attempts: 2,
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({ "outcome": "failure", "elapsed_ms": 300, "attempts": 2 })
        );

        let infra = OperationResult::Failure {
            elapsed: None,
            attempts: 0,
        };
        assert_eq!(
            serde_json::to_value(&infra).unwrap(),
            serde_json::json!({ "outcome": "failure", "elapsed_ms": null, "attempts": 0 })
        );
    }
}
