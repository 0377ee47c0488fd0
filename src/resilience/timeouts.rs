//! Operation budget.
//!
//! # Responsibilities
//! - Anchor the wall-clock budget at a single start instant
//! - Answer "has the budget expired?" and "when is the deadline?"
//!
//! # Design Decisions
//! - Uses Tokio's `Instant` so a paused test clock drives it
//! - Copyable: both retry loops hold the same anchor
//! - No per-attempt timeout; a slow attempt may consume the whole budget
//! - Instant arithmetic never panics: an unrepresentable deadline becomes a
//!   far-future instant, an unrepresentable wake-up becomes the deadline

use std::time::Duration;
use tokio::time::Instant;

/// Stand-in for a deadline that `Instant` cannot represent (roughly 30 years).
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// Wall-clock budget shared by every loop of one operation.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    started: Instant,
    limit: Duration,
}

impl Budget {
    /// Start a budget now.
    pub fn start(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    pub fn starting_at(started: Instant, limit: Duration) -> Self {
        Self { started, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Instant at which the budget runs out.
    pub fn deadline(&self) -> Instant {
        self.started
            .checked_add(self.limit)
            .or_else(|| self.started.checked_add(FAR_FUTURE))
            .unwrap_or(self.started)
    }

    pub fn is_expired(&self) -> bool {
        self.started.elapsed() >= self.limit
    }

    pub fn remaining(&self) -> Duration {
        self.limit.saturating_sub(self.started.elapsed())
    }

    /// Earliest of `now + delay` and the deadline.
    pub fn wake_after(&self, delay: Duration) -> Instant {
        let deadline = self.deadline();
        match Instant::now().checked_add(delay) {
            Some(wake) => wake.min(deadline),
            None => deadline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_budget_expiry() {
        let budget = Budget::start(Duration::from_millis(1000));
        assert!(!budget.is_expired());
        assert_eq!(budget.remaining(), Duration::from_millis(1000));

        tokio::time::advance(Duration::from_millis(400)).await;
        assert!(!budget.is_expired());
        assert_eq!(budget.remaining(), Duration::from_millis(600));

        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(budget.is_expired());
        assert_eq!(budget.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wake_after_clamped_to_deadline() {
        let started = Instant::now();
        let budget = Budget::starting_at(started, Duration::from_millis(1000));

        assert_eq!(
            budget.wake_after(Duration::from_millis(300)),
            started + Duration::from_millis(300)
        );
        assert_eq!(budget.wake_after(Duration::from_secs(5)), budget.deadline());
        assert_eq!(budget.wake_after(Duration::MAX), budget.deadline());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_limit_does_not_overflow() {
        let started = Instant::now();
        let budget = Budget::starting_at(started, Duration::MAX);

        assert!(budget.deadline() > started + Duration::from_secs(86400 * 365));
        assert!(!budget.is_expired());
        assert_eq!(
            budget.wake_after(Duration::from_millis(300)),
            started + Duration::from_millis(300)
        );
        assert_eq!(budget.wake_after(Duration::MAX), budget.deadline());
    }

    #[test]
    fn test_zero_budget_is_expired() {
        let budget = Budget::starting_at(Instant::now(), Duration::ZERO);
        assert!(budget.is_expired());
    }
}
