//! Shared robot state passed to every command

use drivebase_core::drive::DrivetrainConfig;
use drivebase_core::parameters::{ParamValue, ParameterStore};
use drivebase_core::stats::StatsAccumulator;
use drivebase_core::traits::TimeSource;

use crate::core::dashboard;
use crate::libraries::OperatorInterface;
use crate::subsystems::DriveSubsystem;

/// Everything a command may read or drive during a tick
pub struct RobotContext<T: TimeSource> {
    /// Drive base
    pub drive: DriveSubsystem,
    /// Driver gamepad
    pub oi: OperatorInterface,
    /// Tunables and published diagnostics
    pub dashboard: ParameterStore,
    /// Flip-front and brake-mode state
    pub config: DrivetrainConfig,
    /// Robot clock
    pub time: T,
    /// Loop durations measured by the robot loop (seconds)
    pub loop_stats: StatsAccumulator,
    /// Duration of the most recent loop (seconds)
    pub last_loop_secs: f64,
}

impl<T: TimeSource> RobotContext<T> {
    /// Bundle subsystems with an empty dashboard
    pub fn new(drive: DriveSubsystem, oi: OperatorInterface, time: T) -> Self {
        Self {
            drive,
            oi,
            dashboard: ParameterStore::new(),
            config: DrivetrainConfig::new(),
            time,
            loop_stats: StatsAccumulator::new(),
            last_loop_secs: 0.0,
        }
    }

    /// Publish a read-only diagnostic value
    pub fn publish(&mut self, name: &str, value: impl Into<ParamValue>) {
        dashboard::publish(&mut self.dashboard, name, value);
    }

    /// Record one loop duration
    pub fn record_loop(&mut self, secs: f64) {
        self.last_loop_secs = secs;
        self.loop_stats.add(secs);
    }
}
