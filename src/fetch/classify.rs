//! Classify fetch errors for log detail and skip reasons.
//!
//! Informational only: every failure takes the same fallback (single-item
//! path) or skip (batch path) regardless of kind.

use super::FetchError;

/// High-level classification of a fetch failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Operation timed out (connect/read/inactivity).
    Timeout,
    /// Server asked us to slow down (429, 503).
    Throttled,
    /// Network-level failure (connection reset, DNS, etc.).
    Connection,
    /// Server-side HTTP error that is not throttling (5xx).
    Http5xx(u16),
    /// Any other error (4xx, malformed URL, ...).
    Other,
}

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> FailureKind {
    match code {
        429 | 503 => FailureKind::Throttled,
        500..=599 => FailureKind::Http5xx(code as u16),
        _ => FailureKind::Other,
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}

/// Classify a fetch error (curl or HTTP) into a `FailureKind`.
pub fn classify(e: &FetchError) -> FailureKind {
    match e {
        FetchError::Curl(ce) => classify_curl_error(ce),
        FetchError::Http(code) => classify_http_status(*code),
    }
}
