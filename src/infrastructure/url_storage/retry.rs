//! Immutable retry policy for storage calls.

use std::num::NonZeroU32;
use std::time::Duration;
use tokio_retry::strategy::{FixedInterval, jitter};
use tonic::Code;

/// Codes retried by default: the two conditions known to be safe to repeat.
pub const DEFAULT_RETRYABLE_CODES: [Code; 2] = [Code::Aborted, Code::DeadlineExceeded];

/// Pause between attempts when none is configured.
pub const DEFAULT_BACKOFF: Duration = Duration::from_millis(50);

/// Bounded-retry policy applied to every gateway call.
///
/// Built once when the gateway is constructed and never mutated afterwards.
/// `NotFound` and `AlreadyExists` carry domain meaning and are never retried,
/// whatever codes are configured.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: NonZeroU32,
    retryable_codes: Vec<Code>,
    per_attempt_timeout: Duration,
    backoff: Duration,
}

impl RetryPolicy {
    /// Policy retrying [`DEFAULT_RETRYABLE_CODES`] with [`DEFAULT_BACKOFF`].
    pub fn new(max_attempts: NonZeroU32, per_attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            retryable_codes: DEFAULT_RETRYABLE_CODES.to_vec(),
            per_attempt_timeout,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Replaces the set of retryable codes. Domain codes are dropped.
    pub fn with_retryable_codes(mut self, codes: impl IntoIterator<Item = Code>) -> Self {
        let mut retryable: Vec<Code> = Vec::new();
        for code in codes {
            if !is_domain_code(code) && !retryable.contains(&code) {
                retryable.push(code);
            }
        }
        self.retryable_codes = retryable;
        self
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.get()
    }

    pub fn per_attempt_timeout(&self) -> Duration {
        self.per_attempt_timeout
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub fn retryable_codes(&self) -> &[Code] {
        &self.retryable_codes
    }

    pub fn is_retryable(&self, code: Code) -> bool {
        self.retryable_codes.contains(&code)
    }

    /// Pauses to sleep between attempts: one fewer than `max_attempts`.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + Send + use<> {
        let retries = (self.max_attempts.get() - 1) as usize;
        FixedInterval::new(self.backoff).map(jitter).take(retries)
    }
}

fn is_domain_code(code: Code) -> bool {
    matches!(code, Code::NotFound | Code::AlreadyExists)
}
