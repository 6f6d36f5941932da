//! Simulated time source.
//!
//! Wraps a shared atomic counter so the simulation loop can advance time
//! while the robot reads it through [`TimeSource`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use drivebase_core::traits::TimeSource;

/// Simulated time backed by a shared atomic counter.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct SimTimeSource {
    time_us: Arc<AtomicU64>,
}

impl SimTimeSource {
    /// Create a time source starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance simulation time.
    pub fn advance_us(&self, us: u64) {
        self.time_us.fetch_add(us, Ordering::Relaxed);
    }

    /// Set simulation time to an absolute value.
    pub fn set_us(&self, us: u64) {
        self.time_us.store(us, Ordering::Relaxed);
    }
}

impl TimeSource for SimTimeSource {
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    fn now_us(&self) -> u64 {
        self.time_us.load(Ordering::Relaxed)
    }
}
