//! Tick-timed drive test
//!
//! Autonomous check of how consistently the drive base travels when driven
//! purely by time. Ramp and cruise lengths come from `TT_RAMP_TICKS` and
//! `TT_CRUISE_TICKS`, cruise power from the fixed drive powers multiplied by
//! the per-side gains.
//!
//! While running, each tick publishes the measured side velocities under the
//! current phase:
//!
//! | Phase    | Values                         |
//! |----------|--------------------------------|
//! | RampUp   | `TT_UP_VEL_L`, `TT_UP_VEL_R`   |
//! | Cruise   | `TT_CRUISE_VEL_L`, `TT_CRUISE_VEL_R` |
//! | RampDown | `TT_DOWN_VEL_L`, `TT_DOWN_VEL_R` |
//!
//! Cruise velocities should stay close to constant; ramp-down velocities
//! should end near zero.

use drivebase_core::parameters::TickTimedParams;
use drivebase_core::sequencer::{RampPhase, RampSequencer};
use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Three-phase ramp driven for a fixed number of ticks
#[derive(Debug, Clone)]
pub struct DriveTickTimed {
    left_gain: f32,
    right_gain: f32,
    sequencer: RampSequencer,
}

impl DriveTickTimed {
    /// Create with per-side power multipliers (typically 1.0 or -1.0)
    pub fn new(left_gain: f32, right_gain: f32) -> Self {
        Self {
            left_gain,
            right_gain,
            sequencer: RampSequencer::default(),
        }
    }

    /// Underlying ramp state
    pub fn sequencer(&self) -> &RampSequencer {
        &self.sequencer
    }

    fn velocity_labels(phase: RampPhase) -> Option<(&'static str, &'static str)> {
        match phase {
            RampPhase::RampUp => Some(("TT_UP_VEL_L", "TT_UP_VEL_R")),
            RampPhase::Cruise => Some(("TT_CRUISE_VEL_L", "TT_CRUISE_VEL_R")),
            RampPhase::RampDown => Some(("TT_DOWN_VEL_L", "TT_DOWN_VEL_R")),
            RampPhase::Done => None,
        }
    }
}

impl<T: TimeSource> RobotCommand<T> for DriveTickTimed {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        let params = TickTimedParams::from_store(&ctx.dashboard);
        self.sequencer.initialize(
            params.ramp_ticks,
            params.cruise_ticks,
            params.left_power * self.left_gain,
            params.right_power * self.right_gain,
        );
        crate::log_info!(
            "DriveTickTimed: ramp {} cruise {} ticks",
            params.ramp_ticks,
            params.cruise_ticks
        );
    }

    fn execute(&mut self, ctx: &mut RobotContext<T>) {
        let phase = self.sequencer.phase();
        let power = self.sequencer.advance();
        ctx.drive.apply_power(power);

        if let Some((left_label, right_label)) = Self::velocity_labels(phase) {
            let left = ctx.drive.left().reading().velocity;
            let right = ctx.drive.right().reading().velocity;
            ctx.publish(left_label, left);
            ctx.publish(right_label, right);
        }

        if self.sequencer.phase() != phase {
            crate::log_debug!(
                "DriveTickTimed: {} -> {}",
                phase.name(),
                self.sequencer.phase().name()
            );
        }
    }

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        self.sequencer.is_finished()
    }

    fn end(&mut self, ctx: &mut RobotContext<T>, _interrupted: bool) {
        let stop = self.sequencer.interrupt();
        ctx.drive.apply_power(stop);
    }

    fn name(&self) -> &'static str {
        "DriveTickTimed"
    }

    fn requires_drive(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::robot::commands::test_support::TestRig;
    use drivebase_core::parameters::tick_timed::{PARAM_CRUISE_TICKS, PARAM_RAMP_TICKS};
    use drivebase_core::parameters::ParamValue;

    fn rig(ramp: i32, cruise: i32) -> TestRig {
        let mut rig = TestRig::new();
        TickTimedParams::register_defaults(&mut rig.ctx.dashboard).unwrap();
        let store = &mut rig.ctx.dashboard;
        store.set(PARAM_RAMP_TICKS, ParamValue::Int(ramp)).unwrap();
        store.set(PARAM_CRUISE_TICKS, ParamValue::Int(cruise)).unwrap();
        rig
    }

    fn run(cmd: &mut DriveTickTimed, rig: &mut TestRig) -> u32 {
        cmd.initialize(&mut rig.ctx);
        let mut ticks = 0;
        loop {
            cmd.execute(&mut rig.ctx);
            ticks += 1;
            if cmd.is_finished(&mut rig.ctx) {
                break;
            }
            assert!(ticks < 1000);
        }
        cmd.end(&mut rig.ctx, false);
        ticks
    }

    #[test]
    fn test_default_powers_and_length() {
        let mut rig = rig(20, 40);
        let mut cmd = DriveTickTimed::new(1.0, 1.0);
        assert_eq!(run(&mut cmd, &mut rig), 80);

        let history = rig.drive.left_motor.history();
        // 80 ticks plus the stop from end()
        assert_eq!(history.len(), 81);
        assert!((history[19] - 0.4).abs() < 1e-6);
        assert!((history[40] - 0.4).abs() < 1e-6);
        assert_eq!(history[79], 0.0);
        assert_eq!(history[80], 0.0);
    }

    #[test]
    fn test_rotate_gains() {
        let mut rig = rig(2, 2);
        let mut cmd = DriveTickTimed::new(1.0, -1.0);
        run(&mut cmd, &mut rig);
        let left = rig.drive.left_motor.history();
        let right = rig.drive.right_motor.history();
        assert!((left[2] - 0.4).abs() < 1e-6);
        assert!((right[2] + 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_publishes_phase_velocities() {
        let mut rig = rig(2, 2);
        rig.drive.left_encoder.set_rate(3.0);
        rig.drive.right_encoder.set_rate(2.5);
        rig.ctx.drive.periodic(&mut rig.ctx.dashboard);

        let mut cmd = DriveTickTimed::new(1.0, 1.0);
        run(&mut cmd, &mut rig);
        let store = &rig.ctx.dashboard;
        assert_eq!(store.get_float("TT_UP_VEL_L", 0.0), 3.0);
        assert_eq!(store.get_float("TT_CRUISE_VEL_R", 0.0), 2.5);
        assert_eq!(store.get_float("TT_DOWN_VEL_L", 0.0), 3.0);
    }

    #[test]
    fn test_interrupt_stops_once() {
        let mut rig = rig(20, 40);
        let mut cmd = DriveTickTimed::new(1.0, 1.0);
        cmd.initialize(&mut rig.ctx);
        for _ in 0..30 {
            cmd.execute(&mut rig.ctx);
        }
        cmd.end(&mut rig.ctx, true);
        let history = rig.drive.right_motor.history();
        assert_eq!(history.len(), 31);
        assert_eq!(history[30], 0.0);
        assert!(cmd.sequencer().is_finished());
    }

    #[test]
    fn test_negative_ticks_fall_back_to_zero() {
        let mut rig = rig(-5, 3);
        let mut cmd = DriveTickTimed::new(1.0, 1.0);
        cmd.initialize(&mut rig.ctx);
        assert_eq!(cmd.sequencer().ramp_ticks(), 0);
        assert_eq!(cmd.sequencer().cruise_ticks(), 3);
    }
}
