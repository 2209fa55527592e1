use rand::Rng;
use std::fmt;
use std::time::Duration;

/// High-level classification of an error for retry purposes.
///
/// The fetch executor maps curl errors and HTTP status codes into these
/// kinds; the controller only ever looks at the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Operation timed out (connect/read).
    Timeout,
    /// Network-level failure (connection reset, DNS, send/recv).
    Connection,
    /// Server asked us to slow down (503).
    Throttled,
    /// Retryable server-side HTTP status (other 5xx).
    Http5xx(u16),
    /// Client-side HTTP status (4xx). Never retried.
    Http4xx(u16),
    /// Any other error. Never retried.
    Other,
}

impl ErrorKind {
    /// Whether this kind may succeed if reattempted.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Timeout
            | ErrorKind::Connection
            | ErrorKind::Throttled
            | ErrorKind::Http5xx(_) => true,
            ErrorKind::Http4xx(_) | ErrorKind::Other => false,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Timeout => write!(f, "timeout"),
            ErrorKind::Connection => write!(f, "connection failure"),
            ErrorKind::Throttled => write!(f, "throttled"),
            ErrorKind::Http5xx(code) => write!(f, "server error (HTTP {})", code),
            ErrorKind::Http4xx(code) => write!(f, "client error (HTTP {})", code),
            ErrorKind::Other => write!(f, "unclassified error"),
        }
    }
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff policy with a delay cap and bounded jitter.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Base delay for backoff.
    pub base_delay: Duration,
    /// Upper bound on the pre-jitter backoff delay.
    pub max_delay: Duration,
    /// Jitter fraction applied to the capped delay (0.1 = ±10%).
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(30),
            jitter: 0.1,
        }
    }
}

impl RetryPolicy {
    /// Pre-jitter delay for a 1-based attempt: `min(base * 2^(attempt-1), cap)`.
    ///
    /// Monotonically non-decreasing in `attempt` and never negative.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        // Shift guard keeps the exponent in u32 range for large attempts;
        // the cap dominates long before it matters.
        let exp = 1u32 << attempt.saturating_sub(1).min(16);
        let raw = self.base_delay.saturating_mul(exp);
        raw.min(self.max_delay)
    }

    /// Perturb a delay by ±`jitter` of its value to desynchronize retry
    /// storms. Clamped so the result is never negative.
    pub fn apply_jitter<R: Rng>(&self, delay: Duration, rng: &mut R) -> Duration {
        let jitter = self.jitter.clamp(0.0, 1.0);
        if jitter == 0.0 || delay.is_zero() {
            return delay;
        }
        let factor = (1.0 + rng.gen_range(-jitter..=jitter)).max(0.0);
        delay.mul_f64(factor)
    }

    /// Compute the retry decision for a 1-based attempt and error kind.
    ///
    /// Fatal kinds are never retried; retryable kinds are retried with a
    /// jittered exponential backoff while `attempt < max_attempts`.
    pub fn decide<R: Rng>(&self, attempt: u32, kind: ErrorKind, rng: &mut R) -> RetryDecision {
        if !kind.is_retryable() || attempt >= self.max_attempts {
            return RetryDecision::NoRetry;
        }
        let delay = self.apply_jitter(self.backoff_delay(attempt), rng);
        RetryDecision::RetryAfter(delay)
    }
}
