//! Per-operation coordination state.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Counters shared by the two retry loops of a single operation.
///
/// Created fresh by every `perform_operation` call and dropped with it.
#[derive(Debug, Default)]
pub struct SharedState {
    /// Attempts issued across both sources.
    attempts: AtomicU32,
    /// Set by the first loop to reach a local failure.
    peer_failed: AtomicBool,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one issued attempt, returning the new total.
    pub fn record_attempt(&self) -> u32 {
        self.attempts.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Register a local failure.
    ///
    /// Returns `true` if the other loop had already failed. Exactly one
    /// caller per operation observes `false`.
    pub fn register_failure(&self) -> bool {
        self.peer_failed.swap(true, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub(crate) fn any_failed(&self) -> bool {
        self.peer_failed.load(Ordering::Acquire)
    }
}
