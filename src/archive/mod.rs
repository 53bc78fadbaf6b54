//! Batch archive assembly: sequential relay fetches grouped into a
//! folder-per-subject zip.
//!
//! Records are fetched one at a time, strictly in input order, from their
//! primary source only (mirror fallback is a single-download behavior, not
//! a batch one). Individual failures are logged and skipped; only zip
//! serialization failure is surfaced as an aggregate error.

mod builder;
mod state;

use std::sync::Arc;

use chrono::Local;
use thiserror::Error;

use crate::catalog::PaperRecord;
use crate::config::CoreConfig;
use crate::fetch::{classify, FetchError};
use crate::progress::{percent_of, BuildProgress};
use crate::resolver;

use builder::{folder_name, ArchiveTree};
use state::BuildState;

/// Per-record outcome of a batch build, collected in input order.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Payload archived under the given folder.
    Archived { id: String, folder: String },
    /// Fetch failed; the record is omitted from the archive.
    Skipped { id: String, error: FetchError },
}

impl ItemOutcome {
    pub fn is_archived(&self) -> bool {
        matches!(self, ItemOutcome::Archived { .. })
    }
}

/// Completed batch build, ready for the persistence collaborator.
#[derive(Debug)]
pub struct BuiltArchive {
    /// `{prefix}_{YYYY-MM-DD}.zip`, dated at build completion.
    pub file_name: String,
    /// Serialized zip bytes.
    pub bytes: Vec<u8>,
    /// Per-record outcomes in input order.
    pub outcomes: Vec<ItemOutcome>,
}

/// Result of an admitted or rejected build request.
#[derive(Debug)]
pub enum BuildOutcome {
    Built(BuiltArchive),
    /// Another build was active; nothing was fetched, no state changed.
    AlreadyRunning,
}

#[derive(Debug, Error)]
pub enum BuildError {
    /// Precondition: `build` requires a non-empty selection.
    #[error("empty selection: nothing to archive")]
    EmptySelection,
    /// Zip serialization failed; no partial archive is produced.
    #[error("archive serialization failed: {0}")]
    Serialize(#[from] zip::result::ZipError),
    /// A blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Batch pipeline. One long-lived instance per process; holds the
/// singleton build state the UI polls via `progress`.
pub struct ArchivePipeline {
    config: Arc<CoreConfig>,
    state: BuildState,
}

impl ArchivePipeline {
    pub fn new(config: Arc<CoreConfig>) -> Self {
        Self {
            config,
            state: BuildState::new(),
        }
    }

    /// Current build progress snapshot.
    pub fn progress(&self) -> BuildProgress {
        self.state.snapshot()
    }

    /// Fetches `records` sequentially and packages the successes into one
    /// zip named `{prefix}_{YYYY-MM-DD}.zip`.
    ///
    /// An empty selection is a precondition failure, rejected before any
    /// state mutation. A request while another build is active returns
    /// `AlreadyRunning` without touching state or issuing any fetch. An
    /// all-failed batch still yields a valid, empty archive by design.
    /// State is reset on every exit path.
    pub async fn build(&self, records: &[PaperRecord]) -> Result<BuildOutcome, BuildError> {
        if records.is_empty() {
            return Err(BuildError::EmptySelection);
        }
        if !self.state.try_begin(records.len()) {
            tracing::debug!("archive build rejected: another build is active");
            return Ok(BuildOutcome::AlreadyRunning);
        }

        let result = self.run(records).await;
        self.state.finish();
        result
    }

    async fn run(&self, records: &[PaperRecord]) -> Result<BuildOutcome, BuildError> {
        let mut tree = ArchiveTree::default();
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            let config = Arc::clone(&self.config);
            let rec = record.clone();
            let fetched =
                tokio::task::spawn_blocking(move || resolver::resolve_primary(&rec, &config))
                    .await?;

            match fetched {
                Ok(bytes) => {
                    let folder = folder_name(&record.subject_name);
                    tree.insert(&folder, &record.file_name, bytes);
                    outcomes.push(ItemOutcome::Archived {
                        id: record.id.clone(),
                        folder,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        id = %record.id,
                        kind = ?classify(&e),
                        "skipping record in batch: {}", e
                    );
                    outcomes.push(ItemOutcome::Skipped {
                        id: record.id.clone(),
                        error: e,
                    });
                }
            }
            self.state.item_done();
        }

        let archived = tree.entry_count();
        let bytes = tree.into_zip(|written, total| {
            self.state.set_percent(percent_of(written, total));
        })?;

        let file_name = format!(
            "{}_{}.zip",
            self.config.archive_prefix,
            Local::now().format("%Y-%m-%d")
        );
        tracing::info!(
            %file_name,
            archived,
            skipped = outcomes.len() - archived,
            "archive build complete"
        );
        Ok(BuildOutcome::Built(BuiltArchive {
            file_name,
            bytes,
            outcomes,
        }))
    }
}
