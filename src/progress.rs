//! Progress reporting for batch archive builds (UI polling surface).
//!
//! The pipeline updates one shared build state; UI collaborators read
//! `BuildProgress` snapshots at any time. During the fetch phase percent is
//! `round(100 * completed/total)`; once serialization starts it reflects
//! zip-writing progress on the same channel. Per-record single-download
//! progress lives in `transfer::TransferTracker`.

/// Snapshot of batch build progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildProgress {
    /// True from batch admission until the terminal reset.
    pub is_active: bool,
    /// Records processed so far (successes and skips both count).
    pub completed: usize,
    /// Records in the batch.
    pub total: usize,
    /// 0-100, non-decreasing within a phase.
    pub percent: u8,
}

impl BuildProgress {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        self.percent as f64 / 100.0
    }
}

/// Rounds `completed / total` to a whole percent, clamped to [0, 100].
/// A zero total reads as fully complete.
pub(crate) fn percent_of(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((completed as f64 / total as f64) * 100.0).round().min(100.0) as u8
}
