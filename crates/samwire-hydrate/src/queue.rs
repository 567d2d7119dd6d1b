//! Process-wide FIFO of replay entries.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, PoisonError},
};

use crate::ReplayEntry;

/// FIFO queue of [`ReplayEntry`] values awaiting hydration.
///
/// The owned form of the page-global `toReplay` array: created once at
/// startup, cloned (cheaply, by handle) into both the markup-emitting side
/// and the client runtime, pushed
/// by any number of producers before hydration, and drained exactly once.
/// After the drain it stays alive but empty for the rest of the page's life;
/// it is never reset.
///
/// # Invariants
///
/// - Entries come out in exactly the order they were pushed.
/// - [`pop_front`](Self::pop_front) removes the entry it returns, so a
///   drain loop that pops one entry at a time observes entries pushed while
///   the drain is running, yet never hands out the same entry twice.
#[derive(Debug, Clone, Default)]
pub struct ReplayQueue {
    inner: Arc<Mutex<VecDeque<ReplayEntry>>>,
}

impl ReplayQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the back of the queue.
    pub fn push(&self, entry: ReplayEntry) {
        self.lock().push_back(entry);
    }

    /// Remove and return the oldest entry, or `None` if the queue is empty.
    pub fn pop_front(&self) -> Option<ReplayEntry> {
        self.lock().pop_front()
    }

    /// Number of entries currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the queue is currently empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<ReplayEntry>> {
        // The critical sections here never panic, but recover anyway rather
        // than poison the whole queue.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
