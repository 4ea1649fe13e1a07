use hydrowatch_schemas::reading::TaggedReading;
use std::collections::VecDeque;

/// Bounded, insertion-ordered history of the most recent readings.
///
/// The store is the only state the dashboard keeps between ticks: a fixed
/// capacity ring where appending beyond capacity evicts the oldest entry.
/// Capacity must be at least 1; the monitor builder enforces this.
#[derive(Debug)]
pub struct SampleStore {
    capacity: usize,
    samples: VecDeque<TaggedReading>,
}

impl SampleStore {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        }
    }

    pub fn append(&mut self, sample: TaggedReading) {
        self.samples.push_back(sample);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// The last `n` samples in chronological order (oldest first).
    pub fn recent(&self, n: usize) -> Vec<&TaggedReading> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).collect()
    }

    pub fn latest(&self) -> Option<&TaggedReading> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaggedReading> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
