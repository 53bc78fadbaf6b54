use serde::{Deserialize, Serialize};

use crate::relay::RelayConfig;

/// Mirror URL template tried when a record's primary source fails.
/// `{subject}` is the subject code with underscores replaced by hyphens,
/// `{year}` the record's exam year.
const DEFAULT_MIRROR_TEMPLATE: &str = "https://www.vedantu.com/content-files-downloadable/previous-year-question-paper/cbse-class-12-{subject}-question-paper-{year}.pdf";

/// Configuration supplied by the embedding collaborator.
///
/// The core never reads this from disk; defaults match the reference
/// deployment. Serde-round-trippable so embedders may persist it if they
/// want to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Relay all remote fetches are routed through.
    #[serde(default)]
    pub relay: RelayConfig,
    /// Per-fetch inactivity timeout in seconds. A stalled fetch is treated
    /// as an ordinary failure of that item, never as a batch abort.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Ordered mirror URL templates; the first listed is tried first.
    #[serde(default = "default_mirror_templates")]
    pub mirror_templates: Vec<String>,
    /// Prefix for the batch archive file name
    /// (`{prefix}_{YYYY-MM-DD}.zip`).
    #[serde(default = "default_archive_prefix")]
    pub archive_prefix: String,
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_mirror_templates() -> Vec<String> {
    vec![DEFAULT_MIRROR_TEMPLATE.to_string()]
}

fn default_archive_prefix() -> String {
    "CBSE_Papers".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            mirror_templates: default_mirror_templates(),
            archive_prefix: default_archive_prefix(),
        }
    }
}
