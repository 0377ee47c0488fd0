//! Adapter for synchronous source clients.
//!
//! # Responsibilities
//! - Accept a plain `Fn(&str) -> SourceResponse` client call
//! - Run each call on Tokio's blocking pool so it never stalls the runtime
//! - Turn a panicking call into a `Failure` response
//!
//! # Design Decisions
//! - A blocking call cannot be interrupted; aborting the race only stops
//!   the loop from issuing the next one

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::source::{SourceError, SourceResponse, StatusSource};

type BlockingCall = dyn Fn(&str) -> SourceResponse + Send + Sync;

/// Wraps a synchronous status call.
pub struct BlockingSource {
    name: String,
    call: Arc<BlockingCall>,
}

impl BlockingSource {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&str) -> SourceResponse + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            call: Arc::new(call),
        }
    }
}

impl fmt::Debug for BlockingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl StatusSource for BlockingSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, application_id: &str) -> SourceResponse {
        let call = Arc::clone(&self.call);
        let id = application_id.to_string();

        match tokio::task::spawn_blocking(move || call(&id)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(source = %self.name, error = %e, "Blocking attempt did not complete");
                SourceResponse::Failure {
                    cause: SourceError::Task(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_runs_synchronous_call() {
        let source = BlockingSource::new("sync", |id: &str| {
            std::thread::sleep(Duration::from_millis(5));
            SourceResponse::Success {
                application_id: id.to_string(),
                status: "APPROVED".into(),
            }
        });

        assert_eq!(source.name(), "sync");
        assert_eq!(
            source.attempt("app-3").await,
            SourceResponse::Success {
                application_id: "app-3".into(),
                status: "APPROVED".into()
            }
        );
    }

    #[tokio::test]
    async fn test_panic_becomes_failure() {
        let source = BlockingSource::new("sync", |_: &str| -> SourceResponse {
            panic!("client exploded");
        });

        match source.attempt("app-3").await {
            SourceResponse::Failure {
                cause: SourceError::Task(_),
            } => {}
            other => panic!("unexpected response: {:?}", other),
        }
    }
}
