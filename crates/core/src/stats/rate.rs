//! Tick rate measurement

/// Ticks between rate reports
pub const DEFAULT_REPORT_INTERVAL: u32 = 10;

/// Keeps the rate finite on the first report
const ELAPSED_EPSILON_SECS: f64 = 1e-5;

/// One rate report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSample {
    /// Ticks counted since start
    pub ticks: u32,
    /// Seconds since start
    pub elapsed_secs: f64,
    /// Ticks per second
    pub rate_hz: f64,
}

/// Counts ticks and periodically reports ticks per second since start
#[derive(Debug, Clone)]
pub struct RateMeter {
    ticks: u32,
    report_every: u32,
    start_us: u64,
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_INTERVAL)
    }
}

impl RateMeter {
    /// Create a meter reporting every `report_every` ticks (at least 1)
    pub fn new(report_every: u32) -> Self {
        Self {
            ticks: 0,
            report_every: report_every.max(1),
            start_us: 0,
        }
    }

    /// Restart counting from `now_us`
    pub fn start(&mut self, now_us: u64) {
        self.ticks = 0;
        self.start_us = now_us;
    }

    /// Count one tick, returning a report every `report_every` ticks
    pub fn tick(&mut self, now_us: u64) -> Option<RateSample> {
        self.ticks = self.ticks.saturating_add(1);
        if self.ticks % self.report_every != 0 {
            return None;
        }
        let elapsed_secs = now_us.saturating_sub(self.start_us) as f64 / 1_000_000.0;
        Some(RateSample {
            ticks: self.ticks,
            elapsed_secs,
            rate_hz: self.ticks as f64 / (elapsed_secs + ELAPSED_EPSILON_SECS),
        })
    }

    /// Ticks counted since start
    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_interval() {
        let mut meter = RateMeter::new(10);
        meter.start(1_000_000);
        for i in 1..10u64 {
            assert!(meter.tick(1_000_000 + i * 20_000).is_none());
        }
        let sample = meter.tick(1_200_000).unwrap();
        assert_eq!(sample.ticks, 10);
        assert!((sample.elapsed_secs - 0.2).abs() < 1e-9);
        assert!((sample.rate_hz - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_zero_elapsed_is_finite() {
        let mut meter = RateMeter::new(1);
        meter.start(0);
        let sample = meter.tick(0).unwrap();
        assert!(sample.rate_hz.is_finite());
        assert!(sample.rate_hz > 0.0);
    }

    #[test]
    fn test_interval_at_least_one() {
        let mut meter = RateMeter::new(0);
        meter.start(0);
        assert!(meter.tick(20_000).is_some());
        assert_eq!(meter.ticks(), 1);
    }
}
