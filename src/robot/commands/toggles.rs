//! One-shot drivetrain toggles
//!
//! Both commands flip a [`DrivetrainConfig`](drivebase_core::drive::DrivetrainConfig)
//! flag, publish the new value and finish on the same tick.

use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Swap which end of the robot drives as the front
#[derive(Debug, Default)]
pub struct FlipFront;

impl FlipFront {
    /// One-shot flip of the driving front
    pub fn new() -> Self {
        Self
    }
}

impl<T: TimeSource> RobotCommand<T> for FlipFront {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        let flipped = ctx.config.toggle_flip();
        ctx.publish("FLIPPED", flipped);
        crate::log_info!("Front flipped: {}", flipped);
    }

    fn execute(&mut self, _ctx: &mut RobotContext<T>) {}

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        true
    }

    fn end(&mut self, _ctx: &mut RobotContext<T>, _interrupted: bool) {}

    fn name(&self) -> &'static str {
        "FlipFront"
    }
}

/// Switch the motor controllers between brake and coast
#[derive(Debug, Default)]
pub struct BrakeModeToggle;

impl BrakeModeToggle {
    /// One-shot brake/coast toggle
    pub fn new() -> Self {
        Self
    }
}

impl<T: TimeSource> RobotCommand<T> for BrakeModeToggle {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        let brake = ctx.config.toggle_brake();
        if ctx.drive.set_brake_mode(brake).is_err() {
            crate::log_warn!("Brake mode: controller rejected change");
        }
        ctx.publish("BRAKE_MODE", brake);
        crate::log_info!("Brake mode: {}", brake);
    }

    fn execute(&mut self, _ctx: &mut RobotContext<T>) {}

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        true
    }

    fn end(&mut self, _ctx: &mut RobotContext<T>, _interrupted: bool) {}

    fn name(&self) -> &'static str {
        "BrakeModeToggle"
    }
}
