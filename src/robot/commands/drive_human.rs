//! Teleop drive from the gamepad
//!
//! Default drive command. Mode and tuning are re-read from the dashboard
//! every tick so changes apply immediately.

use drivebase_core::drive::{DriveModeSelector, DriveOptions};
use drivebase_core::parameters::DriveParams;
use drivebase_core::traits::TimeSource;

use super::RobotCommand;
use crate::robot::context::RobotContext;

/// Joystick-driven teleop
#[derive(Debug, Default)]
pub struct DriveHuman {
    selector: DriveModeSelector,
}

impl DriveHuman {
    /// Arcade drive until the dashboard selects another mode
    pub fn new() -> Self {
        Self {
            selector: DriveModeSelector::new(DriveOptions::default()),
        }
    }

    /// Options used on the last tick
    pub fn options(&self) -> &DriveOptions {
        self.selector.options()
    }

    fn reload<T: TimeSource>(&mut self, ctx: &RobotContext<T>) {
        let params = DriveParams::from_store(&ctx.dashboard);
        self.selector.set_options(params.options);
    }
}

impl<T: TimeSource> RobotCommand<T> for DriveHuman {
    fn initialize(&mut self, ctx: &mut RobotContext<T>) {
        self.reload(ctx);
        crate::log_info!("DriveHuman: {} drive", self.selector.mode().name());
    }

    fn execute(&mut self, ctx: &mut RobotContext<T>) {
        let _previous = self.selector.mode();
        self.reload(ctx);
        if self.selector.mode() != _previous {
            crate::log_info!(
                "DriveHuman: {} -> {} drive",
                _previous.name(),
                self.selector.mode().name()
            );
        }

        let inputs = ctx.oi.drive_inputs();
        let power = self.selector.compute_power(
            &inputs,
            ctx.config.is_flipped(),
            ctx.oi.slow_mode_active(),
        );
        ctx.drive.apply_power(power);
    }

    fn is_finished(&mut self, _ctx: &mut RobotContext<T>) -> bool {
        false
    }

    fn end(&mut self, ctx: &mut RobotContext<T>, _interrupted: bool) {
        ctx.drive.stop();
    }

    fn name(&self) -> &'static str {
        "DriveHuman"
    }

    fn requires_drive(&self) -> bool {
        true
    }
}
