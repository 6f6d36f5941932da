//! Command rate readout
//!
//! Counts its own executions and every tenth tick publishes the tick count,
//! elapsed time and ticks per second since it started. Useful for checking
//! that the robot loop keeps its 50 Hz rate.

use drivebase_core::stats::{RateMeter, DEFAULT_REPORT_INTERVAL};
use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Publishes how often the scheduler runs this command
#[derive(Debug, Clone, Default)]
pub struct DebugRate {
    meter: RateMeter,
}

impl DebugRate {
    /// Report every 10 ticks
    pub fn new() -> Self {
        Self {
            meter: RateMeter::new(DEFAULT_REPORT_INTERVAL),
        }
    }
}

impl<T: TimeSource> RobotCommand<T> for DebugRate {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        self.meter.start(ctx.time.now_us());
    }

    fn execute(&mut self, ctx: &mut RobotContext<T>) {
        if let Some(sample) = self.meter.tick(ctx.time.now_us()) {
            ctx.publish("RATE_ITERS", sample.ticks as i32);
            ctx.publish("RATE_TIME", sample.elapsed_secs as f32);
            ctx.publish("RATE_HZ", sample.rate_hz as f32);
        }
    }

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        false
    }

    fn end(&mut self, _ctx: &mut RobotContext<T>, _interrupted: bool) {}

    fn name(&self) -> &'static str {
        "DebugRate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::commands::test_support::TestRig;

    #[test]
    fn test_reports_every_tenth_tick() {
        let mut rig = TestRig::new();
        let mut cmd = DebugRate::new();
        cmd.initialize(&mut rig.ctx);

        for _ in 0..9 {
            rig.ctx.time.advance(20_000);
            cmd.execute(&mut rig.ctx);
        }
        assert!(rig.ctx.dashboard.get("RATE_HZ").is_none());

        rig.ctx.time.advance(20_000);
        cmd.execute(&mut rig.ctx);
        let store = &rig.ctx.dashboard;
        assert_eq!(store.get_int("RATE_ITERS", 0), 10);
        assert!((store.get_float("RATE_TIME", 0.0) - 0.2).abs() < 1e-6);
        assert!((store.get_float("RATE_HZ", 0.0) - 50.0).abs() < 0.01);
    }
}
