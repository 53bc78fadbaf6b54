//! Relay indirection for cross-origin fetches.
//!
//! The paper sources do not grant direct cross-origin access to the UI's
//! execution context, so every remote fetch is routed through a
//! URL-rewriting relay that takes the target URL as a query parameter.
//! The core depends only on "fetch bytes for URL X via the relay".

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Default relay endpoint; the percent-encoded target URL is appended.
const DEFAULT_ENDPOINT: &str = "https://api.allorigins.win/raw?url=";

/// Relay endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Endpoint prefix the percent-encoded target URL is appended to.
    pub endpoint: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl RelayConfig {
    /// Returns the relayed form of `target`: endpoint plus the
    /// percent-encoded target URL.
    pub fn wrap(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        format!("{}{}", self.endpoint, encoded)
    }
}
