//! Retry loop: run a closure until success, a fatal error, exhaustion, or abort.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::classify;
use super::error::{FetchError, RequestError};
use super::policy::{RetryDecision, RetryPolicy};
use crate::control::AbortToken;

/// Runs a closure until it succeeds or the retry policy says to stop.
///
/// On retryable failure, sleeps for the jittered backoff duration then tries
/// again. The abort token is checked before each attempt and before each
/// sleep. Fatal classifications surface immediately; once the attempt budget
/// is spent, the last retryable cause is wrapped in `FetchError::Exhausted`.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, abort: &AbortToken, f: F) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, RequestError>,
{
    let mut rng = StdRng::from_entropy();
    run_with_retry_with_rng(policy, abort, &mut rng, f)
}

/// Like [`run_with_retry`] but with a caller-supplied RNG, so backoff jitter
/// is reproducible under a fixed seed.
pub fn run_with_retry_with_rng<T, F, R>(
    policy: &RetryPolicy,
    abort: &AbortToken,
    rng: &mut R,
    mut f: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Result<T, RequestError>,
    R: Rng,
{
    let mut attempt = 1u32;
    loop {
        if abort.is_aborted() {
            return Err(FetchError::Aborted { attempts: attempt - 1 });
        }
        match f() {
            Ok(value) => return Ok(value),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind, rng) {
                    RetryDecision::NoRetry => {
                        return if kind.is_retryable() {
                            tracing::warn!(attempts = attempt, error = %e, "retries exhausted");
                            Err(FetchError::Exhausted { attempts: attempt, last: e })
                        } else {
                            Err(FetchError::Fatal { attempts: attempt, kind, source: e })
                        };
                    }
                    RetryDecision::RetryAfter(delay) => {
                        tracing::debug!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "transient failure, backing off"
                        );
                        if abort.is_aborted() {
                            return Err(FetchError::Aborted { attempts: attempt });
                        }
                        std::thread::sleep(delay);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
