//! Loop timing readout
//!
//! The robot loop records how long each pass takes into the context's loop
//! statistics. This command clears them when started and publishes the
//! last, average and worst loop time every tick.

use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Publishes loop timing statistics
#[derive(Debug, Default)]
pub struct Performance;

impl Performance {
    /// Loop timing readout
    pub fn new() -> Self {
        Self
    }
}

impl<T: TimeSource> RobotCommand<T> for Performance {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        ctx.loop_stats.zero();
        ctx.last_loop_secs = 0.0;
    }

    fn execute(&mut self, ctx: &mut RobotContext<T>) {
        let last = ctx.last_loop_secs as f32;
        let avg = ctx.loop_stats.average() as f32;
        let max = ctx.loop_stats.max() as f32;
        ctx.publish("RUN_LAST", last);
        ctx.publish("RUN_AVG", avg);
        ctx.publish("RUN_MAX", max);
    }

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        false
    }

    fn end(&mut self, _ctx: &mut RobotContext<T>, _interrupted: bool) {}

    fn name(&self) -> &'static str {
        "Performance"
    }

    fn runs_when_disabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::commands::test_support::TestRig;

    #[test]
    fn test_publishes_loop_stats() {
        let mut rig = TestRig::new();
        rig.ctx.record_loop(0.5);
        let mut cmd = Performance::new();
        cmd.initialize(&mut rig.ctx);
        assert_eq!(rig.ctx.loop_stats.count(), 0);

        rig.ctx.record_loop(0.002);
        rig.ctx.record_loop(0.004);
        cmd.execute(&mut rig.ctx);

        let store = &rig.ctx.dashboard;
        assert!((store.get_float("RUN_LAST", 0.0) - 0.004).abs() < 1e-6);
        assert!((store.get_float("RUN_AVG", 0.0) - 0.003).abs() < 1e-6);
        assert!((store.get_float("RUN_MAX", 0.0) - 0.004).abs() < 1e-6);
    }
}
