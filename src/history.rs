//! Fixed-length sample history.
//!
//! [`HistoryBuffer`] is a strict FIFO that is always full: it starts with
//! `N` copies of a fill value and every push evicts the oldest sample, so the
//! graph always has exactly one sample per pixel column. The same type with
//! a small `N` backs the CPU temperature smoothing window.

use heapless::Deque;

use crate::config::{HISTORY_FILL_VALUE, HISTORY_LEN};
use crate::variables::TrackedVariable;

/// Bounded FIFO of `N` samples, oldest first.
#[derive(Clone, Debug)]
pub struct HistoryBuffer<const N: usize> {
    samples: Deque<f32, N>,
}

impl<const N: usize> HistoryBuffer<N> {
    /// Create a buffer holding `N` copies of `value`.
    pub fn filled(value: f32) -> Self {
        let mut samples = Deque::new();
        while !samples.is_full() {
            // Cannot fail, the loop stops at capacity
            let _ = samples.push_back(value);
        }
        Self { samples }
    }

    /// Append `value`, evicting the oldest sample.
    pub fn push(
        &mut self,
        value: f32,
    ) {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        let _ = self.samples.push_back(value);
    }

    /// Number of samples held (always `N`).
    #[inline]
    pub fn len(&self) -> usize { self.samples.len() }

    /// Never true for `N > 0`; provided alongside [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Samples in push order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ { self.samples.iter().copied() }

    /// Owned copy of the samples, oldest first.
    pub fn snapshot(&self) -> Vec<f32> { self.iter().collect() }

    /// Most recently pushed sample.
    pub fn latest(&self) -> Option<f32> { self.samples.back().copied() }

    /// Smallest and largest sample.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.iter().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Arithmetic mean of all samples.
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.iter().sum::<f32>() / self.len() as f32)
    }
}

/// Graph history of one tracked variable.
pub type VariableHistory = HistoryBuffer<HISTORY_LEN>;

/// One history per tracked variable, indexed by [`TrackedVariable`].
#[derive(Clone, Debug)]
pub struct Histories {
    buffers: [VariableHistory; TrackedVariable::COUNT],
}

impl Histories {
    /// Create every history filled with the neutral value.
    pub fn new() -> Self {
        Self {
            buffers: core::array::from_fn(|_| HistoryBuffer::filled(HISTORY_FILL_VALUE)),
        }
    }

    /// Push a reading into the variable's history.
    pub fn push(
        &mut self,
        variable: TrackedVariable,
        value: f32,
    ) {
        self.buffers[variable.index()].push(value);
    }

    /// History of one variable.
    pub fn get(
        &self,
        variable: TrackedVariable,
    ) -> &VariableHistory {
        &self.buffers[variable.index()]
    }

    /// Latest value of one variable.
    pub fn latest(
        &self,
        variable: TrackedVariable,
    ) -> f32 {
        self.get(variable).latest().unwrap_or(HISTORY_FILL_VALUE)
    }
}

impl Default for Histories {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_starts_at_capacity() {
        let buffer: HistoryBuffer<8> = HistoryBuffer::filled(1.0);
        assert_eq!(buffer.len(), 8);
        assert!(buffer.iter().all(|v| v == 1.0));
    }

    #[test]
    fn test_length_constant_after_many_pushes() {
        let mut buffer: HistoryBuffer<8> = HistoryBuffer::filled(1.0);
        for i in 0..100 {
            buffer.push(i as f32);
            assert_eq!(buffer.len(), 8, "length changed after push {i}");
        }
    }

    #[test]
    fn test_push_order_oldest_first() {
        let mut buffer: HistoryBuffer<4> = HistoryBuffer::filled(1.0);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0, 60.0] {
            buffer.push(v);
        }
        assert_eq!(buffer.snapshot(), vec![30.0, 40.0, 50.0, 60.0]);
        assert_eq!(buffer.latest(), Some(60.0));
    }

    #[test]
    fn test_partial_pushes_keep_fill_values() {
        let mut buffer: HistoryBuffer<4> = HistoryBuffer::filled(1.0);
        buffer.push(5.0);
        assert_eq!(buffer.snapshot(), vec![1.0, 1.0, 1.0, 5.0]);
    }

    #[test]
    fn test_min_max_and_mean() {
        let mut buffer: HistoryBuffer<3> = HistoryBuffer::filled(0.0);
        buffer.push(-2.0);
        buffer.push(4.0);
        buffer.push(1.0);
        assert_eq!(buffer.min_max(), Some((-2.0, 4.0)));
        assert_eq!(buffer.mean(), Some(1.0));
    }

    #[test]
    fn test_histories_are_independent() {
        let mut histories = Histories::new();
        histories.push(TrackedVariable::Humidity, 55.0);
        assert_eq!(histories.latest(TrackedVariable::Humidity), 55.0);
        assert_eq!(histories.latest(TrackedVariable::Pressure), 1.0);
        assert_eq!(histories.get(TrackedVariable::Humidity).len(), HISTORY_LEN);
    }
}
