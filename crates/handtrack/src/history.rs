//! Fixed-capacity circular history of per-frame observations.
//!
//! Slots start empty (`None`); the buffer never grows and the oldest entry is
//! overwritten once `capacity` values have been written.

#[derive(Debug, Clone)]
pub struct History<T> {
    slots: Vec<Option<T>>,
    /// Slot holding the most recent write.
    index: usize,
}

impl<T: Copy> History<T> {
    /// Create an empty history. A zero capacity is promoted to one slot.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.capacity()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        let cap = self.capacity();
        (index + cap - 1) % cap
    }

    /// Advance the write pointer and store `value` there.
    pub fn push(&mut self, value: T) {
        self.index = self.next_index(self.index);
        self.slots[self.index] = Some(value);
    }

    /// Most recent value, if any.
    pub fn latest(&self) -> Option<T> {
        self.slots[self.index]
    }

    fn index_back(&self, n: usize) -> usize {
        let cap = self.capacity();
        (self.index + cap - n % cap) % cap
    }

    /// Value written `n` pushes before the latest (`back(0) == latest()`).
    pub fn back(&self, n: usize) -> Option<T> {
        self.slots[self.index_back(n)]
    }

    /// Overwrite the slot `n` pushes before the latest.
    pub fn set_back(&mut self, n: usize, value: T) {
        let idx = self.index_back(n);
        self.slots[idx] = Some(value);
    }

    /// The `n` most recent values, newest first, or `None` if any is missing.
    pub fn recent(&self, n: usize) -> Option<Vec<T>> {
        (0..n.min(self.capacity())).map(|i| self.back(i)).collect()
    }

    /// All stored values from oldest to newest, skipping empty slots.
    pub fn oldest_first(&self) -> Vec<T> {
        let cap = self.capacity();
        (1..=cap)
            .filter_map(|k| self.slots[(self.index + k) % cap])
            .collect()
    }
}
