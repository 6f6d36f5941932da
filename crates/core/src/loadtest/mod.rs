//! CPU load test
//!
//! Finds how many iterations of a synthetic workload fit in a fixed time
//! budget. The loop count starts at 1 and doubles after every run that fits
//! in the budget, halving after every run that does not. The search ends on
//! the first over-budget run that follows an in-budget run.

use libm::{cos, pow, sin};

use crate::stats::StatsAccumulator;

/// Time budget for one workload run
pub const DEFAULT_TARGET_SECS: f64 = 0.1;

/// Loop count ceiling
///
/// The workload cost grows with the square of the loop count, so the search
/// stops here even if every run fits in the budget.
pub const DEFAULT_MAX_LOOPS: u32 = 1 << 14;

/// Run the synthetic workload `loops` times
///
/// Mixes integer statistics updates with transcendental math. Returns the
/// floating point accumulator so the work cannot be optimized away.
pub fn run_workload(loops: u32, stats: &mut StatsAccumulator) -> f64 {
    let mut accum = 0.0;
    for i in 0..loops {
        let n = i / 4;
        for j in 0..n {
            let mut x = (((j >> 3) + 1) * 7 / 8) as i64;
            if j % 4 == 0 {
                x = -x;
            }
            stats.add(x as f64);
        }
        let ratio = i as f64 / loops as f64;
        accum += sin(ratio);
        accum += pow(core::f64::consts::PI, ratio);
        accum += cos(ratio);
        stats.add(accum);
    }
    accum
}

/// Loop-count search state
#[derive(Debug, Clone)]
pub struct LoadTestSearch {
    loop_count: u32,
    previous_below: bool,
    run_secs: f64,
    target_secs: f64,
    max_loops: u32,
    finished: bool,
}

impl Default for LoadTestSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadTestSearch {
    /// Search with the default 0.1 s budget
    pub fn new() -> Self {
        Self {
            loop_count: 1,
            previous_below: false,
            run_secs: 0.0,
            target_secs: DEFAULT_TARGET_SECS,
            max_loops: DEFAULT_MAX_LOOPS,
            finished: false,
        }
    }

    /// Override the time budget
    pub fn with_target_secs(mut self, target_secs: f64) -> Self {
        if target_secs > 0.0 {
            self.target_secs = target_secs;
        }
        self
    }

    /// Override the loop count ceiling (at least 1)
    pub fn with_max_loops(mut self, max_loops: u32) -> Self {
        self.max_loops = max_loops.max(1);
        self
    }

    /// Start a new search
    pub fn reset(&mut self) {
        self.loop_count = 1;
        self.previous_below = false;
        self.run_secs = 0.0;
        self.finished = false;
    }

    /// Loops to run next (or the final count once finished)
    pub fn loop_count(&self) -> u32 {
        self.loop_count
    }

    /// Duration of the most recent run
    pub fn run_secs(&self) -> f64 {
        self.run_secs
    }

    /// True once the search has settled
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Record how long the last run of `loop_count()` loops took
    ///
    /// Returns `true` when the search is finished. The loop count is left at
    /// the value that produced the final run.
    pub fn record_run(&mut self, run_secs: f64) -> bool {
        if self.finished {
            return true;
        }
        self.run_secs = run_secs;

        if run_secs > self.target_secs {
            if self.previous_below {
                self.finished = true;
                return true;
            }
            self.previous_below = false;
            self.loop_count = (self.loop_count / 2).max(1);
        } else {
            if self.loop_count >= self.max_loops {
                self.finished = true;
                return true;
            }
            self.previous_below = true;
            self.loop_count = self.loop_count.saturating_mul(2).min(self.max_loops);
        }
        false
    }

    /// Loops per second for the last run (0 when the run took no time)
    pub fn hz(&self) -> f64 {
        if self.run_secs > 0.0 {
            self.loop_count as f64 / self.run_secs
        } else {
            0.0
        }
    }
}
