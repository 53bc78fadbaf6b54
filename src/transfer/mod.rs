//! Single-item downloads: mirror-fallback resolution, local save, and the
//! transient per-record progress state the UI polls.

mod sink;
mod tracker;

pub use sink::{DirSink, FallbackViewer, SaveSink};
pub use tracker::TransferTracker;

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::PaperRecord;
use crate::config::CoreConfig;
use crate::resolver;

/// Grace period a terminal tracker entry stays visible before cleanup, so
/// the UI can briefly show 100% (or a failure glyph).
const CLEANUP_GRACE: Duration = Duration::from_millis(1000);

/// Single-item download front end. One long-lived instance per process;
/// owns the per-record transfer state.
pub struct Transfers<S, V> {
    config: Arc<CoreConfig>,
    tracker: Arc<TransferTracker>,
    sink: S,
    viewer: V,
    cleanup_grace: Duration,
}

impl<S: SaveSink, V: FallbackViewer> Transfers<S, V> {
    pub fn new(config: Arc<CoreConfig>, sink: S, viewer: V) -> Self {
        Self {
            config,
            tracker: Arc::new(TransferTracker::new()),
            sink,
            viewer,
            cleanup_grace: CLEANUP_GRACE,
        }
    }

    /// Overrides the post-completion cleanup grace period (tests use a
    /// short one).
    pub fn with_cleanup_grace(mut self, grace: Duration) -> Self {
        self.cleanup_grace = grace;
        self
    }

    /// Read surface over the per-record transfer state.
    pub fn tracker(&self) -> &TransferTracker {
        &self.tracker
    }

    /// Downloads one record: resolve (primary, then mirrors in order),
    /// persist under `record.file_name`, report percent via the tracker.
    ///
    /// Any failure — resolver exhaustion, save error, task failure — is
    /// logged and degraded to exactly one fallback open of the primary URL;
    /// nothing here is fatal to the process. The tracker entry is removed
    /// after the grace period unless a new transfer for the same id starts
    /// first.
    pub async fn download(&self, record: &PaperRecord) {
        let generation = self.tracker.start(&record.id);

        let config = Arc::clone(&self.config);
        let rec = record.clone();
        let outcome =
            tokio::task::spawn_blocking(move || resolver::resolve(&rec, &config)).await;

        match outcome {
            Ok(Ok(bytes)) => match self.sink.save(&record.file_name, &bytes) {
                Ok(()) => {
                    self.tracker.set_percent(&record.id, generation, 100);
                    tracing::info!(id = %record.id, file = %record.file_name, "download complete");
                }
                Err(e) => {
                    tracing::warn!(id = %record.id, "save failed, opening source directly: {}", e);
                    self.viewer.open(&record.source_url);
                }
            },
            Ok(Err(e)) => {
                tracing::warn!(id = %record.id, "download failed, opening source directly: {}", e);
                self.viewer.open(&record.source_url);
            }
            Err(e) => {
                tracing::warn!(id = %record.id, "download task failed, opening source directly: {}", e);
                self.viewer.open(&record.source_url);
            }
        }

        let tracker = Arc::clone(&self.tracker);
        let id = record.id.clone();
        let grace = self.cleanup_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            tracker.remove_if_generation(&id, generation);
        });
    }
}
