//! Simulated driver station
//!
//! Cycles the robot through a practice match: 2 s disabled, 15 s
//! autonomous, 2 s disabled, 30 s teleop, then starts over.

use drivebase::robot::RobotState;

/// Match periods as (state, duration in microseconds)
pub const MATCH_CYCLE: [(RobotState, u64); 4] = [
    (RobotState::Disabled, 2_000_000),
    (RobotState::Autonomous, 15_000_000),
    (RobotState::Disabled, 2_000_000),
    (RobotState::Teleop, 30_000_000),
];

/// Driver station game-mode cycle
#[derive(Debug, Clone, Default)]
pub struct DriverStationSim {
    period: usize,
    elapsed_us: u64,
}

impl DriverStationSim {
    /// Start at the beginning of the match (disabled, autonomous next)
    pub fn new() -> Self {
        Self::default()
    }

    /// Current robot state
    pub fn state(&self) -> RobotState {
        MATCH_CYCLE[self.period].0
    }

    /// Time spent in the current period
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Seconds left in the current period
    pub fn game_time(&self) -> f32 {
        let remaining = MATCH_CYCLE[self.period].1.saturating_sub(self.elapsed_us);
        remaining as f32 / 1_000_000.0
    }

    /// Advance the clock, moving through as many periods as `dt_us` covers
    pub fn advance(&mut self, dt_us: u64) {
        self.elapsed_us = self.elapsed_us.saturating_add(dt_us);
        while self.elapsed_us >= MATCH_CYCLE[self.period].1 {
            self.elapsed_us -= MATCH_CYCLE[self.period].1;
            self.period = (self.period + 1) % MATCH_CYCLE.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_disabled_then_autonomous() {
        let mut ds = DriverStationSim::new();
        assert_eq!(ds.state(), RobotState::Disabled);
        assert!((ds.game_time() - 2.0).abs() < 1e-6);
        ds.advance(1_980_000);
        assert_eq!(ds.state(), RobotState::Disabled);
        ds.advance(20_000);
        assert_eq!(ds.state(), RobotState::Autonomous);
        assert_eq!(ds.elapsed_us(), 0);
        assert!((ds.game_time() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_cycle_wraps() {
        let mut ds = DriverStationSim::new();
        ds.advance(2_000_000 + 15_000_000);
        assert_eq!(ds.state(), RobotState::Disabled);
        ds.advance(2_000_000);
        assert_eq!(ds.state(), RobotState::Teleop);
        ds.advance(30_000_000 + 500_000);
        assert_eq!(ds.state(), RobotState::Disabled);
        assert_eq!(ds.elapsed_us(), 500_000);
    }
}
