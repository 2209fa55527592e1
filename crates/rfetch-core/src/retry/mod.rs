//! Retry and backoff policy.
//!
//! This module encapsulates error classification (timeouts, connection
//! failures, HTTP status ranges) and exponential backoff decisions so that
//! the fetch layer and any future callers share a consistent policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::{FetchError, RequestError};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, run_with_retry_with_rng};
