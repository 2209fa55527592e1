//! Classify HTTP status and curl errors into retry policy error kinds.

use super::error::RequestError;
use super::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
///
/// Status contract: 2xx/3xx succeed before classification is reached, all of
/// 4xx is fatal (including 429), 5xx is retryable with 503 treated as
/// throttling.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        503 => ErrorKind::Throttled,
        500..=599 => ErrorKind::Http5xx(code as u16),
        400..=499 => ErrorKind::Http4xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

/// Classify a per-attempt error into an ErrorKind.
pub fn classify(e: &RequestError) -> ErrorKind {
    match e {
        RequestError::Curl(ce) => classify_curl_error(ce),
        RequestError::Http(code) => classify_http_status(*code),
    }
}
