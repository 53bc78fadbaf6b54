//! Blocking in-memory HTTP GET (curl Easy).
//!
//! Runs on the current thread; call from `spawn_blocking` if used from
//! async code. All remote fetches in this crate go through here, already
//! wrapped in the relay form by the caller.

mod classify;

pub use classify::{classify, FailureKind};

use std::fmt;
use std::time::Duration;

/// Error from a single fetch attempt (curl failure or HTTP error status).
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Http(_) => None,
        }
    }
}

/// Downloads `url` into memory with a single GET.
///
/// Follows up to 10 redirects. `timeout` bounds both connect time and
/// inactivity: a transfer below 1 KiB/s for that long is aborted, so one
/// stalled source cannot block a whole batch. Non-2xx responses are errors.
pub fn fetch_bytes(url: &str, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(FetchError::Curl)?;
    easy.follow_location(true).map_err(FetchError::Curl)?;
    easy.max_redirections(10).map_err(FetchError::Curl)?;
    easy.connect_timeout(timeout).map_err(FetchError::Curl)?;
    easy.low_speed_limit(1024).map_err(FetchError::Curl)?;
    easy.low_speed_time(timeout).map_err(FetchError::Curl)?;

    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(FetchError::Curl)?;
        transfer.perform().map_err(FetchError::Curl)?;
    }

    let code = easy.response_code().map_err(FetchError::Curl)?;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http(code));
    }
    Ok(body)
}
