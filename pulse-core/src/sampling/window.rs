//! Fixed-capacity sliding window of timestamped intensity samples

use std::collections::VecDeque;

/// Sliding FIFO window over (intensity, timestamp) pairs
///
/// Always holds the most recent `capacity` samples (or fewer before first
/// fill); pushing into a full window evicts the oldest pair first. Backing
/// storage is allocated once at construction and never grows.
#[derive(Debug)]
pub struct SampleWindow {
    samples: VecDeque<(f32, i64)>,
    capacity: usize,
}

impl SampleWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest pair when full
    pub fn push(&mut self, intensity: f32, timestamp: i64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back((intensity, timestamp));
    }

    /// Ordered copy of the buffered intensities, oldest first
    pub fn snapshot(&self) -> Vec<f32> {
        self.samples.iter().map(|&(intensity, _)| intensity).collect()
    }

    /// Copy intensities into `dst` without allocating
    ///
    /// # Returns
    /// Number of samples copied: `min(len(), dst.len())`
    pub fn copy_intensities_into(&self, dst: &mut [f32]) -> usize {
        let mut copied = 0;
        for (slot, &(intensity, _)) in dst.iter_mut().zip(self.samples.iter()) {
            *slot = intensity;
            copied += 1;
        }
        copied
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

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
