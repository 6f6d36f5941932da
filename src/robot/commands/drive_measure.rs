//! Drive measurement readout
//!
//! Zeroes distance, counts and yaw when started and then publishes motion
//! since the start every tick. Only reads sensors, so it neither requires
//! the drive nor stops when the robot is disabled: push the robot by hand and
//! read the values off the dashboard.

use drivebase_core::measure::{DriveMeasurement, MeasureBaseline};
use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Publishes drive motion relative to where it started
#[derive(Debug, Default)]
pub struct DriveMeasure {
    baseline: MeasureBaseline,
    last: DriveMeasurement,
}

impl DriveMeasure {
    /// Measurement zeroed when the command starts
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent measurement
    pub fn last(&self) -> &DriveMeasurement {
        &self.last
    }
}

impl<T: TimeSource> RobotCommand<T> for DriveMeasure {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        self.baseline = MeasureBaseline::capture(&ctx.drive.sample());
        self.last = DriveMeasurement::default();
    }

    fn execute(&mut self, ctx: &mut RobotContext<T>) {
        let m = self.baseline.measure(&ctx.drive.sample());
        ctx.publish("YAW_RAW", m.yaw_raw);
        ctx.publish("YAW_MEAS", m.yaw);
        ctx.publish("L_DIST", m.left_distance);
        ctx.publish("L_CNTS", m.left_counts);
        ctx.publish("L_VEL", m.left_velocity);
        ctx.publish("R_DIST", m.right_distance);
        ctx.publish("R_CNTS", m.right_counts);
        ctx.publish("R_VEL", m.right_velocity);
        ctx.publish("ACCEL_X", m.accel_x);
        ctx.publish("ACCEL_Y", m.accel_y);
        ctx.publish("BUMP", m.bump);
        self.last = m;
    }

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        false
    }

    fn end(&mut self, _ctx: &mut RobotContext<T>, _interrupted: bool) {}

    fn name(&self) -> &'static str {
        "Measure"
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}
