//! Robot commands
//!
//! A command runs under the [`CommandScheduler`](crate::core::scheduler::CommandScheduler)
//! with the lifecycle:
//!
//! 1. `initialize()` once when scheduled
//! 2. `execute()` then `is_finished()` every tick
//! 3. `end(interrupted)` exactly once, whether the command finished, was
//!    replaced by another drive command, or was cancelled
//!
//! Commands that move the robot declare `requires_drive()`; only one of them
//! runs at a time. Commands that only read sensors or publish diagnostics may
//! also declare `runs_when_disabled()`.

pub mod debug_rate;
pub mod drive_human;
pub mod drive_measure;
pub mod drive_tick_timed;
pub mod performance;
pub mod toggles;

pub use debug_rate::DebugRate;
pub use drive_human::DriveHuman;
pub use drive_measure::DriveMeasure;
pub use drive_tick_timed::DriveTickTimed;
pub use load_test::LoadTest;
pub use performance::Performance;
pub use toggles::{BrakeModeToggle, FlipFront};

use drivebase_core::traits::TimeSource;

use super::context::RobotContext;

/// Robot command
pub trait RobotCommand<T: TimeSource> {
    /// Called once when the command is scheduled
    fn initialize(&mut self, ctx: &mut RobotContext<T>);

    /// Called every tick while scheduled
    fn execute(&mut self, ctx: &mut RobotContext<T>);

    /// Checked after every `execute()`
    fn is_finished(&mut self, ctx: &mut RobotContext<T>) -> bool;

    /// Called exactly once when the command stops
    ///
    /// `interrupted` is false only when `is_finished()` returned true.
    fn end(&mut self, ctx: &mut RobotContext<T>, interrupted: bool);

    /// Command name for logging and the dashboard
    fn name(&self) -> &'static str;

    /// Command drives the motors
    fn requires_drive(&self) -> bool {
        false
    }

    /// Command keeps running while the robot is disabled
    fn runs_when_disabled(&self) -> bool {
        false
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use alloc::boxed::Box;

    use drivebase_core::traits::MockTime;

    use crate::libraries::OperatorInterface;
    use crate::platform::mock::MockJoystick;
    use crate::robot::context::RobotContext;
    use crate::subsystems::drive::tests::DriveMocks;

    /// Context built from mocks plus the handles to drive them
    pub(crate) struct TestRig {
        pub ctx: RobotContext<MockTime>,
        pub drive: DriveMocks,
        pub joystick: MockJoystick,
    }

    impl TestRig {
        pub(crate) fn new() -> Self {
            let drive = DriveMocks::new();
            let joystick = MockJoystick::new();
            let ctx = RobotContext::new(
                drive.build(),
                OperatorInterface::new(Box::new(joystick.clone())),
                MockTime::new(),
            );
            Self {
                ctx,
                drive,
                joystick,
            }
        }
    }
}
