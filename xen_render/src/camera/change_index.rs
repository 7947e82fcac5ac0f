/// Shared version stamps for cached camera state.
///
/// A consumer (shader globals, culling caches) keeps the last index it
/// observed as an `Option<ChangeIndex>`; `None` means "never observed",
/// so the first query always reports a change. A different index means
/// the value must be re-fetched.
///
/// Every camera and projection draws its indices from a `ChangeIndexSource`.
/// Cameras built from clones of the same source never share an index, so a
/// consumer that alternates between cameras with a single stored index never
/// reads a false "unchanged".

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A version stamp issued by a `ChangeIndexSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChangeIndex(u64);

impl ChangeIndex {
    /// Raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Compare against a consumer's last observation and record this index.
    ///
    /// Returns `true` if the consumer had not yet seen this index.
    pub fn observe(self, last_seen: &mut Option<ChangeIndex>) -> bool {
        if *last_seen == Some(self) {
            return false;
        }
        *last_seen = Some(self);
        true
    }
}

/// Monotonic, process-shareable counter issuing `ChangeIndex` values.
///
/// Cloning shares the underlying counter.
#[derive(Debug, Clone, Default)]
pub struct ChangeIndexSource {
    counter: Arc<AtomicU64>,
}

impl ChangeIndexSource {
    /// Create an independent source starting at zero
    pub fn new() -> Self {
        Self {
            counter: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Issue the next index. Strictly greater than every index issued before.
    pub fn next(&self) -> ChangeIndex {
        ChangeIndex(self.counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Most recently issued value (0 if none)
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// True if both handles share one counter
    pub fn shares_counter_with(&self, other: &ChangeIndexSource) -> bool {
        Arc::ptr_eq(&self.counter, &other.counter)
    }
}

#[cfg(test)]
#[path = "change_index_tests.rs"]
mod tests;
