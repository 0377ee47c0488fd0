//! Metrics recording.
//!
//! # Metrics
//! - `status_source_attempts_total` (counter): attempts by source, response kind
//! - `status_operations_total` (counter): operations by outcome
//! - `status_operation_duration_seconds` (histogram): operation latency by outcome
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whichever recorder/exporter it wants
//! - Without a recorder every call is a no-op

use std::time::Duration;

use crate::race::OperationResult;
use crate::source::SourceResponse;

/// Record one attempt against a source.
pub fn record_attempt(source: &str, response: &SourceResponse) {
    metrics::counter!(
        "status_source_attempts_total",
        "source" => source.to_string(),
        "response" => response.kind()
    )
    .increment(1);
}

/// Record a finished operation.
pub fn record_operation(result: &OperationResult, duration: Duration) {
    let outcome = result.outcome();
    metrics::counter!("status_operations_total", "outcome" => outcome).increment(1);
    metrics::histogram!("status_operation_duration_seconds", "outcome" => outcome)
        .record(duration.as_secs_f64());
}
