//! Running statistics
//!
//! - [`StatsAccumulator`]: count/sum/min/max/average over scalar samples
//! - [`rate`]: tick rate measurement

pub mod rate;

pub use rate::{RateMeter, RateSample, DEFAULT_REPORT_INTERVAL};

/// Running count, sum, minimum and maximum of scalar samples
///
/// All operations are O(1). With no samples every statistic reads 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatsAccumulator {
    count: u32,
    sum: f64,
    min: f64,
    max: f64,
}

impl StatsAccumulator {
    /// Create an empty accumulator
    pub const fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            min: 0.0,
            max: 0.0,
        }
    }

    /// Discard all samples
    pub fn zero(&mut self) {
        *self = Self::new();
    }

    /// Add one sample
    pub fn add(&mut self, value: f64) {
        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            if value > self.max {
                self.max = value;
            }
            if value < self.min {
                self.min = value;
            }
        }
        self.count = self.count.saturating_add(1);
        self.sum += value;
    }

    /// Number of samples
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sum of all samples
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest sample
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest sample
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Mean of all samples (0 when empty)
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let stats = StatsAccumulator::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.sum(), 0.0);
        assert_eq!(stats.min(), 0.0);
        assert_eq!(stats.max(), 0.0);
        assert_eq!(stats.average(), 0.0);
    }

    #[test]
    fn test_first_sample_sets_bounds() {
        let mut stats = StatsAccumulator::new();
        stats.add(-3.5);
        assert_eq!(stats.min(), -3.5);
        assert_eq!(stats.max(), -3.5);
        assert_eq!(stats.average(), -3.5);
    }

    #[test]
    fn test_bounds_updated_independently() {
        // Second sample raises max, third must still lower min
        let mut stats = StatsAccumulator::new();
        stats.add(5.0);
        stats.add(7.0);
        stats.add(1.0);
        stats.add(6.0);
        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 7.0);
        assert_eq!(stats.count(), 4);
        assert!((stats.sum() - 19.0).abs() < 1e-9);
        assert!((stats.average() - 4.75).abs() < 1e-9);
    }

    #[test]
    fn test_samples_within_bounds() {
        let samples = [0.02, 0.019, 0.031, 0.018, 0.025, 0.5, -0.1];
        let mut stats = StatsAccumulator::new();
        for s in samples {
            stats.add(s);
        }
        assert_eq!(stats.count() as usize, samples.len());
        let expected: f64 = samples.iter().sum();
        assert!((stats.sum() - expected).abs() < 1e-9);
        for s in samples {
            assert!(stats.min() <= s && s <= stats.max());
        }
        assert_eq!(stats.min(), -0.1);
        assert_eq!(stats.max(), 0.5);
    }

    #[test]
    fn test_zero_clears() {
        let mut stats = StatsAccumulator::new();
        stats.add(4.0);
        stats.add(8.0);
        stats.zero();
        assert_eq!(stats, StatsAccumulator::default());
        stats.add(2.0);
        assert_eq!(stats.min(), 2.0);
        assert_eq!(stats.max(), 2.0);
    }
}
