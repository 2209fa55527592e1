//! Shared plumbing for command handlers: request/policy construction from
//! config plus CLI overrides, and Ctrl-C wiring.

use anyhow::{Context, Result};
use rfetch_core::config::RfetchConfig;
use rfetch_core::control::AbortToken;
use rfetch_core::fetch::FetchRequest;
use rfetch_core::retry::RetryPolicy;
use std::collections::HashMap;
use std::time::Duration;

/// Parse repeated `-H "Name: value"` arguments.
pub(super) fn parse_header_args(headers: &[String]) -> Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    for h in headers {
        let (name, value) = h
            .split_once(':')
            .with_context(|| format!("invalid header {:?}, expected \"Name: value\"", h))?;
        map.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(map)
}

/// Build the request from config defaults plus CLI overrides.
pub(super) fn build_request(
    cfg: &RfetchConfig,
    url: &str,
    headers: &[String],
    timeout_secs: Option<u64>,
) -> Result<FetchRequest> {
    let mut req = FetchRequest::new(url);
    req.headers = parse_header_args(headers)?;
    req.connect_timeout = cfg.http.connect_timeout();
    req.timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.http.request_timeout());
    req.user_agent = cfg.http.user_agent.clone();
    Ok(req)
}

/// Build the retry policy from config defaults plus CLI overrides.
pub(super) fn build_policy(
    cfg: &RfetchConfig,
    max_attempts: Option<u32>,
    base_delay_secs: Option<f64>,
    max_delay_secs: Option<u64>,
) -> RetryPolicy {
    let mut policy = cfg.retry.policy();
    if let Some(n) = max_attempts {
        policy.max_attempts = n.max(1);
    }
    if let Some(s) = base_delay_secs {
        policy.base_delay = Duration::from_secs_f64(s.max(0.0));
    }
    if let Some(s) = max_delay_secs {
        policy.max_delay = Duration::from_secs(s);
    }
    policy
}

/// First Ctrl-C sets the abort token; the retry loop stops at its next
/// checkpoint.
pub(super) fn spawn_ctrl_c(abort: AbortToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, aborting");
            abort.request_abort();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers() {
        let map =
            parse_header_args(&["Accept: */*".to_string(), "X-Token:  abc ".to_string()]).unwrap();
        assert_eq!(map.get("Accept").map(String::as_str), Some("*/*"));
        assert_eq!(map.get("X-Token").map(String::as_str), Some("abc"));
    }

    #[test]
    fn rejects_headers_without_a_colon() {
        assert!(parse_header_args(&["not-a-header".to_string()]).is_err());
    }

    #[test]
    fn cli_overrides_beat_config() {
        let cfg = RfetchConfig::default();
        let policy = build_policy(&cfg, Some(2), Some(1.0), Some(10));
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
        assert_eq!(policy.max_delay, Duration::from_secs(10));

        let req = build_request(&cfg, "https://example.com/f", &[], Some(7)).unwrap();
        assert_eq!(req.timeout, Duration::from_secs(7));
        assert_eq!(req.connect_timeout, cfg.http.connect_timeout());
    }
}
