//! Time source abstraction
//!
//! The robot loop, loop-time measurement and rate reporting all read time
//! through [`TimeSource`]. Hardware builds supply a monotonic clock, the
//! simulator supplies lock-step simulated time, and tests use [`MockTime`].

use core::cell::Cell;

/// Monotonic time since robot start
///
/// # Example
///
/// ```
/// use drivebase_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let start = time.now_us();
/// time.advance(20_000); // one 50 Hz tick
/// assert_eq!(time.elapsed_since(start), 20_000);
/// assert!((time.elapsed_secs_since(start) - 0.02).abs() < 1e-9);
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Milliseconds since start
    fn now_ms(&self) -> u64;

    /// Microseconds since start
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `reference_us` (saturating)
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }

    /// Seconds elapsed since `reference_us`
    fn elapsed_secs_since(&self, reference_us: u64) -> f64 {
        self.elapsed_since(reference_us) as f64 / 1_000_000.0
    }
}

/// Manually advanced time source for tests
///
/// Clones share nothing: each clone carries its own counter.
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// MockTime is only used from single-threaded tests.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Start at time 0
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Start at `us` microseconds
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Move time forward
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get().saturating_add(us));
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
