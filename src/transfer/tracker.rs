//! Per-record transfer state registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Shared registry of record id -> transfer percent. The transfer
/// component writes; UI collaborators read snapshots. Each entry carries a
/// generation so a delayed cleanup never removes a newer transfer that
/// reused the same id. Generations come from a tracker-wide counter:
/// deriving them from the current entry would reuse values once a cleanup
/// removes the entry, letting an older pending cleanup match a newer
/// transfer.
#[derive(Debug, Default)]
pub struct TransferTracker {
    entries: RwLock<HashMap<String, Entry>>,
    next_generation: AtomicU64,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    generation: u64,
    percent: u8,
}

impl TransferTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a transfer at 0%, superseding any previous entry for the
    /// id. Returns the new entry's generation.
    pub(crate) fn start(&self, id: &str) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            id.to_string(),
            Entry {
                generation,
                percent: 0,
            },
        );
        generation
    }

    /// Raises the percent for an entry still owned by `generation`.
    /// Percent never decreases within a generation.
    pub(crate) fn set_percent(&self, id: &str, generation: u64, percent: u8) {
        let mut entries = self.entries.write().unwrap();
        if let Some(entry) = entries.get_mut(id) {
            if entry.generation == generation && percent > entry.percent {
                entry.percent = percent.min(100);
            }
        }
    }

    /// Removes the entry unless a newer transfer has taken the id over.
    pub(crate) fn remove_if_generation(&self, id: &str, generation: u64) {
        let mut entries = self.entries.write().unwrap();
        if entries.get(id).is_some_and(|e| e.generation == generation) {
            entries.remove(id);
        }
    }

    /// Percent for an in-flight (or briefly terminal) transfer.
    pub fn percent(&self, id: &str) -> Option<u8> {
        self.entries.read().unwrap().get(id).map(|e| e.percent)
    }

    /// True while the record has a transfer entry.
    pub fn is_active(&self, id: &str) -> bool {
        self.entries.read().unwrap().contains_key(id)
    }

    /// Snapshot of every entry's percent.
    pub fn snapshot(&self) -> HashMap<String, u8> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .map(|(id, entry)| (id.clone(), entry.percent))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_resets_percent_and_bumps_generation() {
        let tracker = TransferTracker::new();
        let g0 = tracker.start("p1");
        tracker.set_percent("p1", g0, 100);
        assert_eq!(tracker.percent("p1"), Some(100));

        let g1 = tracker.start("p1");
        assert!(g1 > g0);
        assert_eq!(tracker.percent("p1"), Some(0));
    }

    #[test]
    fn stale_generation_cannot_write_or_remove() {
        let tracker = TransferTracker::new();
        let g0 = tracker.start("p1");
        let g1 = tracker.start("p1");

        tracker.set_percent("p1", g0, 100);
        assert_eq!(tracker.percent("p1"), Some(0));

        tracker.remove_if_generation("p1", g0);
        assert!(tracker.is_active("p1"));

        tracker.remove_if_generation("p1", g1);
        assert!(!tracker.is_active("p1"));
    }

    #[test]
    fn generation_is_never_reused_after_removal() {
        let tracker = TransferTracker::new();
        let g0 = tracker.start("p1");
        let g1 = tracker.start("p1");
        tracker.remove_if_generation("p1", g1);

        // A fresh transfer for the same id must not get a generation an
        // earlier pending cleanup still holds.
        let g2 = tracker.start("p1");
        assert_ne!(g2, g0);
        tracker.remove_if_generation("p1", g0);
        assert!(tracker.is_active("p1"));
    }

    #[test]
    fn percent_is_monotonic_within_generation() {
        let tracker = TransferTracker::new();
        let g = tracker.start("p1");
        tracker.set_percent("p1", g, 60);
        tracker.set_percent("p1", g, 30);
        assert_eq!(tracker.percent("p1"), Some(60));
    }

    #[test]
    fn snapshot_lists_all_entries() {
        let tracker = TransferTracker::new();
        let g1 = tracker.start("p1");
        tracker.start("p2");
        tracker.set_percent("p1", g1, 100);
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.get("p1"), Some(&100));
        assert_eq!(snapshot.get("p2"), Some(&0));
    }
}
