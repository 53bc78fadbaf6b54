//! Record-to-bytes resolution: primary source first, then mirrors in order.
//!
//! Every fetch goes through the configured relay. These functions block on
//! network I/O; call from `spawn_blocking` if used from async code.

mod mirrors;

pub use mirrors::mirror_urls;

use std::time::Duration;

use thiserror::Error;

use crate::catalog::PaperRecord;
use crate::config::CoreConfig;
use crate::fetch::{self, classify, FetchError};

/// Failure after the primary and every mirror were attempted.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// All sources exhausted; carries the last attempt's error.
    #[error("all sources exhausted after {attempts} attempt(s): {last}")]
    AllSourcesExhausted { attempts: usize, last: FetchError },
}

/// Fetches a record from its primary source only, via the relay.
///
/// This is the batch pipeline's path: the batch deliberately does not fall
/// back to mirrors, single-item downloads do (see `resolve`).
pub fn resolve_primary(record: &PaperRecord, config: &CoreConfig) -> Result<Vec<u8>, FetchError> {
    let timeout = Duration::from_secs(config.fetch_timeout_secs);
    fetch::fetch_bytes(&config.relay.wrap(&record.source_url), timeout)
}

/// Fetches a record, trying the primary source and then each mirror in
/// order until one succeeds.
///
/// A record whose subject/year expands to zero mirrors fails right after
/// the primary attempt. No partial state is retained on failure.
pub fn resolve(record: &PaperRecord, config: &CoreConfig) -> Result<Vec<u8>, ResolveError> {
    let timeout = Duration::from_secs(config.fetch_timeout_secs);

    let mut last = match fetch::fetch_bytes(&config.relay.wrap(&record.source_url), timeout) {
        Ok(bytes) => return Ok(bytes),
        Err(e) => {
            tracing::debug!(
                id = %record.id,
                kind = ?classify(&e),
                "primary fetch failed: {}", e
            );
            e
        }
    };
    let mut attempts = 1usize;

    for mirror in mirror_urls(&config.mirror_templates, record) {
        match fetch::fetch_bytes(&config.relay.wrap(&mirror), timeout) {
            Ok(bytes) => {
                tracing::debug!(id = %record.id, mirror = %mirror, "mirror fetch succeeded");
                return Ok(bytes);
            }
            Err(e) => {
                tracing::debug!(id = %record.id, mirror = %mirror, "mirror fetch failed: {}", e);
                last = e;
                attempts += 1;
            }
        }
    }

    Err(ResolveError::AllSourcesExhausted { attempts, last })
}
