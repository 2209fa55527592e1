//! Error types for single attempts and for the overall retry loop.

use super::policy::ErrorKind;
use std::fmt;
use thiserror::Error;

/// Error produced by one fetch attempt (curl failure or HTTP status).
/// Kept as a concrete enum so the controller can classify it before the
/// terminal error is built.
#[derive(Debug)]
pub enum RequestError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-success status.
    Http(u32),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Curl(e) => write!(f, "{}", e),
            RequestError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Curl(e) => Some(e),
            RequestError::Http(_) => None,
        }
    }
}

/// Terminal outcome of a retry loop that did not succeed.
///
/// Carries the number of attempts actually performed and, where one exists,
/// the last underlying cause.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A fatal classification; no retry was attempted for it.
    #[error("{kind} after {attempts} attempt(s): {source}")]
    Fatal {
        attempts: u32,
        kind: ErrorKind,
        #[source]
        source: RequestError,
    },
    /// The attempt budget was spent entirely on retryable failures.
    #[error("retries exhausted after {attempts} attempt(s): {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: RequestError,
    },
    /// Abort was requested via the caller's token.
    #[error("aborted after {attempts} attempt(s)")]
    Aborted { attempts: u32 },
}

impl FetchError {
    /// Number of attempts performed before this error surfaced.
    pub fn attempts(&self) -> u32 {
        match self {
            FetchError::Fatal { attempts, .. }
            | FetchError::Exhausted { attempts, .. }
            | FetchError::Aborted { attempts } => *attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_reports_attempts_and_cause() {
        let err = FetchError::Exhausted {
            attempts: 4,
            last: RequestError::Http(502),
        };
        assert_eq!(err.attempts(), 4);
        let msg = err.to_string();
        assert!(msg.contains("4 attempt"), "{}", msg);
        assert!(msg.contains("HTTP 502"), "{}", msg);
    }

    #[test]
    fn fatal_names_the_classification() {
        let err = FetchError::Fatal {
            attempts: 1,
            kind: ErrorKind::Http4xx(404),
            source: RequestError::Http(404),
        };
        assert!(err.to_string().contains("client error (HTTP 404)"));
    }
}
