//! Shared batch-build state: one singleton per pipeline.

use std::sync::RwLock;

use crate::progress::{percent_of, BuildProgress};

/// Mutable build state. Only the pipeline writes; any thread may snapshot.
/// `try_begin` is the single-build admission gate.
#[derive(Debug, Default)]
pub(crate) struct BuildState {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    is_active: bool,
    completed: usize,
    total: usize,
    percent: u8,
}

impl BuildState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the state active for `total` items. Returns false and leaves
    /// the state untouched when a build is already active.
    pub fn try_begin(&self, total: usize) -> bool {
        let mut inner = self.inner.write().unwrap();
        if inner.is_active {
            return false;
        }
        *inner = Inner {
            is_active: true,
            completed: 0,
            total,
            percent: 0,
        };
        true
    }

    /// Records one processed item (success or skip) and recomputes percent.
    pub fn item_done(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.completed = (inner.completed + 1).min(inner.total);
        inner.percent = percent_of(inner.completed, inner.total);
    }

    /// Overrides percent during serialization (same reporting channel as
    /// the fetch phase).
    pub fn set_percent(&self, percent: u8) {
        self.inner.write().unwrap().percent = percent.min(100);
    }

    /// Resets to idle. Called on every terminal outcome, success or not.
    pub fn finish(&self) {
        *self.inner.write().unwrap() = Inner::default();
    }

    pub fn snapshot(&self) -> BuildProgress {
        let inner = self.inner.read().unwrap();
        BuildProgress {
            is_active: inner.is_active,
            completed: inner.completed,
            total: inner.total,
            percent: inner.percent,
        }
    }
}
