use std::collections::VecDeque;

use serde::{Serialize, Serializer};

/// Fixed-capacity log ordered most-recent-first.
///
/// Entries are inserted at the front; once `capacity` is exceeded the entry
/// at the back (the oldest by position) is evicted. The log can never hold
/// more than `capacity` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedLog<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedLog<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Builds a log from entries already ordered most-recent-first, keeping
    /// at most `capacity` of them.
    pub fn from_vec(capacity: usize, entries: Vec<T>) -> Self {
        let mut entries = VecDeque::from(entries);
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts one entry as the most recent. Returns what fell off the back.
    pub fn push_front(&mut self, entry: T) -> Vec<T> {
        self.entries.push_front(entry);
        self.evict()
    }

    /// Prepends a batch, keeping the batch's own order at the front of the log.
    pub fn prepend<I>(&mut self, batch: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: DoubleEndedIterator,
    {
        for entry in batch.into_iter().rev() {
            self.entries.push_front(entry);
        }
        self.evict()
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, keep: F) {
        self.entries.retain(keep);
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.entries.iter_mut()
    }

    pub fn front(&self) -> Option<&T> {
        self.entries.front()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.iter().cloned().collect()
    }

    fn evict(&mut self) -> Vec<T> {
        if self.entries.len() <= self.capacity {
            return Vec::new();
        }
        self.entries.split_off(self.capacity).into()
    }
}

impl<T: Serialize> Serialize for BoundedLog<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_front_evicts_oldest() {
        let mut log = BoundedLog::new(3);
        for value in 1..=3 {
            assert!(log.push_front(value).is_empty());
        }

        let evicted = log.push_front(4);
        assert_eq!(evicted, vec![1]);
        assert_eq!(log.to_vec(), vec![4, 3, 2]);
    }

    #[test]
    fn prepend_keeps_batch_order() {
        let mut log = BoundedLog::from_vec(5, vec![3, 2, 1]);
        let evicted = log.prepend(vec![6, 5, 4]);

        assert_eq!(log.to_vec(), vec![6, 5, 4, 3, 2]);
        assert_eq!(evicted, vec![1]);
    }

    #[test]
    fn oversized_batch_is_cut_to_capacity() {
        let mut log = BoundedLog::new(2);
        log.prepend(vec!['a', 'b', 'c']);
        assert_eq!(log.to_vec(), vec!['a', 'b']);
        assert_eq!(log.len(), log.capacity());
    }

    #[test]
    fn from_vec_truncates() {
        let log = BoundedLog::from_vec(2, vec![1, 2, 3, 4]);
        assert_eq!(log.to_vec(), vec![1, 2]);
    }

    #[test]
    fn serializes_as_array() {
        let log = BoundedLog::from_vec(4, vec![2, 1]);
        assert_eq!(serde_json::to_string(&log).unwrap(), "[2,1]");
    }
}
