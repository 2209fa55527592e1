//! Single-attempt HTTP executor and the retrying fetch entry points.
//!
//! Uses the curl crate (libcurl) for transport. One call to [`fetch_once`] or
//! [`head_once`] performs exactly one network operation and never retries
//! internally; [`fetch_with_retry`] / [`head_with_retry`] wrap them in the
//! retry controller. Runs in the current thread; call from `spawn_blocking`
//! if used from async code.

mod parse;

pub use parse::ResponseMeta;

use std::borrow::Cow;
use std::collections::HashMap;
use std::str;
use std::time::Duration;

use crate::control::AbortToken;
use crate::retry::{run_with_retry, FetchError, RequestError, RetryPolicy};

/// One fetch target: URL, custom headers, and per-attempt timeouts.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    /// Extra request headers as name/value pairs.
    pub headers: HashMap<String, String>,
    /// Connect-phase timeout for each attempt.
    pub connect_timeout: Duration,
    /// Total per-attempt timeout (connect + transfer).
    pub timeout: Duration,
    /// Optional User-Agent override.
    pub user_agent: Option<String>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            connect_timeout: Duration::from_secs(15),
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }
}

/// Successful response: status, parsed metadata, and the body bytes
/// (empty for HEAD).
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub meta: ResponseMeta,
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Body decoded as UTF-8, lossily.
    pub fn text_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs one GET and returns the classified result. Redirects are
/// followed by the transport; any final status outside 200..=399 is an error.
pub fn fetch_once(req: &FetchRequest) -> Result<FetchResponse, RequestError> {
    perform(req, false)
}

/// Performs one HEAD (metadata probe). Same classification rules as
/// [`fetch_once`]; the response body is always empty.
pub fn head_once(req: &FetchRequest) -> Result<FetchResponse, RequestError> {
    perform(req, true)
}

/// Fetches `req` under the retry policy: retryable failures back off and
/// retry, fatal failures and exhaustion surface as [`FetchError`].
pub fn fetch_with_retry(
    req: &FetchRequest,
    policy: &RetryPolicy,
    abort: &AbortToken,
) -> Result<FetchResponse, FetchError> {
    run_with_retry(policy, abort, || fetch_once(req))
}

/// HEAD variant of [`fetch_with_retry`].
pub fn head_with_retry(
    req: &FetchRequest,
    policy: &RetryPolicy,
    abort: &AbortToken,
) -> Result<FetchResponse, FetchError> {
    run_with_retry(policy, abort, || head_once(req))
}

fn perform(req: &FetchRequest, head: bool) -> Result<FetchResponse, RequestError> {
    let mut body: Vec<u8> = Vec::new();
    let mut header_lines: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(&req.url).map_err(RequestError::Curl)?;
    if head {
        easy.nobody(true).map_err(RequestError::Curl)?;
    }
    easy.follow_location(true).map_err(RequestError::Curl)?;
    easy.connect_timeout(req.connect_timeout)
        .map_err(RequestError::Curl)?;
    easy.timeout(req.timeout).map_err(RequestError::Curl)?;
    if let Some(ua) = &req.user_agent {
        easy.useragent(ua).map_err(RequestError::Curl)?;
    }

    // Build curl list for custom headers (e.g. "Name: value").
    let mut list = curl::easy::List::new();
    for (k, v) in &req.headers {
        list.append(&format!("{}: {}", k.trim(), v.trim()))
            .map_err(RequestError::Curl)?;
    }
    if !req.headers.is_empty() {
        easy.http_headers(list).map_err(RequestError::Curl)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })
            .map_err(RequestError::Curl)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(RequestError::Curl)?;
        transfer.perform().map_err(RequestError::Curl)?;
    }

    let status = easy.response_code().map_err(RequestError::Curl)?;
    if !(200..400).contains(&status) {
        return Err(RequestError::Http(status));
    }

    Ok(FetchResponse {
        status,
        meta: parse::parse_header_lines(&header_lines),
        body,
    })
}
