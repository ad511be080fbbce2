//! Caller-supplied deadline for storage calls.

use std::time::Duration;
use tokio::time::Instant;

/// Deadline under which a storage call must complete.
///
/// Cancellation is expressed by dropping the call's future; the deadline is the
/// only state that has to travel with the call. A context without a deadline
/// leaves the per-attempt timeout of the gateway as the only bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// Context with no deadline.
    pub fn background() -> Self {
        Self { deadline: None }
    }

    /// Context that expires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Context that expires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, `None` when unbounded.
    ///
    /// Returns [`Duration::ZERO`] once the deadline has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Caps `timeout` so it never outlives the deadline.
    pub fn clamp(&self, timeout: Duration) -> Duration {
        match self.remaining() {
            Some(remaining) => timeout.min(remaining),
            None => timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_background_never_expires() {
        let ctx = CallContext::background();

        tokio::time::advance(Duration::from_secs(3600)).await;

        assert!(!ctx.is_expired());
        assert_eq!(ctx.remaining(), None);
        assert_eq!(ctx.clamp(Duration::from_secs(5)), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_with_timeout_expires() {
        let ctx = CallContext::with_timeout(Duration::from_millis(100));
        assert!(!ctx.is_expired());

        tokio::time::advance(Duration::from_millis(100)).await;

        assert!(ctx.is_expired());
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clamp_uses_shorter_bound() {
        let ctx = CallContext::with_timeout(Duration::from_millis(300));

        assert_eq!(
            ctx.clamp(Duration::from_secs(5)),
            Duration::from_millis(300)
        );
        assert_eq!(
            ctx.clamp(Duration::from_millis(100)),
            Duration::from_millis(100)
        );
    }
}
