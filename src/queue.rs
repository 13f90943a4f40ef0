use crate::domain::Entry;
use parking_lot::Mutex;

/// Ordered buffer of entries awaiting the next scheduled flush.
///
/// Appended to from arbitrarily many concurrent hook callbacks and drained by
/// the single scheduler task. The mutex serializes `push` against the
/// swap-out in `take_all`, so an entry lands in exactly one drain cycle:
/// anything pushed after the swap belongs to the next batch.
#[derive(Debug, Default)]
pub struct BatchQueue {
    entries: Mutex<Vec<Entry>>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: Entry) {
        self.entries.lock().push(entry);
    }

    /// Remove and return every pending entry in insertion order.
    pub fn take_all(&self) -> Vec<Entry> {
        std::mem::take(&mut *self.entries.lock())
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
