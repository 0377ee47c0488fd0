//! Shared sources for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use status_race::{SourceError, SourceResponse, StatusSource};
use tokio::time::Instant;

type Script = dyn Fn(usize) -> (Duration, SourceResponse) + Send + Sync;

/// A source whose answer to call `n` is produced by a closure, returning
/// the latency to simulate and the response.
pub struct ProgrammableSource {
    name: String,
    script: Box<Script>,
    calls: AtomicUsize,
    call_times: Mutex<Vec<Instant>>,
}

impl ProgrammableSource {
    pub fn new<F>(name: &str, script: F) -> Arc<Self>
    where
        F: Fn(usize) -> (Duration, SourceResponse) + Send + Sync + 'static,
    {
        Arc::new(Self {
            name: name.to_string(),
            script: Box::new(script),
            calls: AtomicUsize::new(0),
            call_times: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Instants at which each attempt started.
    pub fn call_times(&self) -> Vec<Instant> {
        self.call_times.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSource for ProgrammableSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn attempt(&self, _application_id: &str) -> SourceResponse {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.call_times.lock().unwrap().push(Instant::now());

        let (latency, response) = (self.script)(call);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        response
    }
}

#[allow(dead_code)]
pub fn success(application_id: &str, status: &str) -> SourceResponse {
    SourceResponse::Success {
        application_id: application_id.to_string(),
        status: status.to_string(),
    }
}

#[allow(dead_code)]
pub fn retry_after(ms: u64) -> SourceResponse {
    SourceResponse::RetryAfter {
        delay: Duration::from_millis(ms),
    }
}

#[allow(dead_code)]
pub fn failure(message: &str) -> SourceResponse {
    SourceResponse::Failure {
        cause: SourceError::Backend(message.to_string()),
    }
}
