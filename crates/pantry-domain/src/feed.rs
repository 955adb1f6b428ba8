//! Client-side state for live snapshot feeds.
//!
//! A live subscription delivers the full current result set on every
//! change. [`LiveView`] holds what is currently rendered and replaces it
//! wholesale on each delivery; no diffing is attempted.

/// Rendered state of a live feed.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveView<T> {
    items: Vec<T>,
    deliveries: u64,
}

impl<T> Default for LiveView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            deliveries: 0,
        }
    }
}

impl<T: PartialEq> LiveView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rendered items with `snapshot`.
    ///
    /// Returns `true` when the rendered list changed. Re-delivering an
    /// identical snapshot leaves the items untouched and returns `false`.
    pub fn apply(&mut self, snapshot: Vec<T>) -> bool {
        self.deliveries += 1;
        if self.items == snapshot {
            return false;
        }
        self.items = snapshot;
        true
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of snapshots received so far, including unchanged ones.
    pub fn deliveries(&self) -> u64 {
        self.deliveries
    }
}
