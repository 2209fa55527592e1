//! Cooperative cancellation for in-flight fetches.
//!
//! A fetch caller (e.g. the CLI's Ctrl-C handler) holds a clone of the token
//! and sets it; the retry loop checks the token before each attempt and
//! before each backoff sleep, then stops with `FetchError::Aborted`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort flag. Cloning is cheap; all clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct AbortToken(Arc<AtomicBool>);

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request abort. The retry loop stops at its next checkpoint; a sleep
    /// already in progress is not interrupted.
    pub fn request_abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = AbortToken::new();
        let other = token.clone();
        assert!(!other.is_aborted());
        token.request_abort();
        assert!(other.is_aborted());
    }
}
