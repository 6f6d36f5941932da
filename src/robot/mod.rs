//! Robot game-mode state machine
//!
//! The host calls [`Robot::loop_func`] once per 20 ms tick with the current
//! driver station state. Each pass:
//!
//! 1. Runs the mode transition hook when the state changed
//! 2. Reads drive sensors ([`DriveSubsystem::periodic`])
//! 3. Polls the gamepad and starts button-bound commands
//! 4. Runs the command scheduler
//!
//! In debug mode the duration of every pass is recorded into the loop
//! statistics read by the [`Performance`] command.
//!
//! ## Mode transitions
//!
//! | Entering     | Action                                   |
//! |--------------|------------------------------------------|
//! | Disabled     | Cancel the drive command                 |
//! | Autonomous   | Start the dashboard-selected auton       |
//! | Teleop       | Cancel the auton command                 |

pub mod commands;
pub mod context;

use alloc::boxed::Box;

use drivebase_core::measure::EncoderScale;
use drivebase_core::parameters::{
    DriveParams, ParamFlags, ParamValue, ParameterStore, TickTimedParams,
};
use drivebase_core::traits::TimeSource;

use crate::core::scheduler::CommandScheduler;
use crate::libraries::oi::{OperatorInterface, FLIP_BUTTON};
use crate::platform::Joystick;
use crate::subsystems::{DriveHardware, DriveSubsystem};

pub use commands::RobotCommand;
pub use context::RobotContext;

use commands::{
    BrakeModeToggle, DebugRate, DriveHuman, DriveMeasure, DriveTickTimed, FlipFront, LoadTest,
    Performance,
};

/// Robot loop period in microseconds (50 Hz)
pub const LOOP_PERIOD_US: u64 = 20_000;

/// Selected autonomous routine (index into [`AutonChoice`])
pub const PARAM_AUTON_MODE: &str = "AUTON_MODE";

/// Expected calibration distance, left side (feet)
pub const PARAM_CAL_EXP_L: &str = "CAL_EXP_L";
/// Measured calibration distance, left side (feet)
pub const PARAM_CAL_MEAS_L: &str = "CAL_MEAS_L";
/// Expected calibration distance, right side (feet)
pub const PARAM_CAL_EXP_R: &str = "CAL_EXP_R";
/// Measured calibration distance, right side (feet)
pub const PARAM_CAL_MEAS_R: &str = "CAL_MEAS_R";

/// Starting value for calibration distances (expected == measured)
pub const DEFAULT_CAL_DISTANCE: f32 = 10.0;

/// Driver station state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RobotState {
    /// Outputs disabled
    #[default]
    Disabled,
    /// Enabled, running the selected auton
    Autonomous,
    /// Enabled, driver in control
    Teleop,
}

impl RobotState {
    /// Robot may drive
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RobotState::Disabled)
    }

    /// State name for logging and the dashboard
    pub fn name(&self) -> &'static str {
        match self {
            RobotState::Disabled => "Disabled",
            RobotState::Autonomous => "Auton",
            RobotState::Teleop => "Teleop",
        }
    }
}

/// Autonomous routines selectable from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AutonChoice {
    /// No auton command
    #[default]
    DoNothing,
    /// Tick-timed ramp forward
    DriveForward,
    /// Tick-timed ramp backward
    DriveBackward,
    /// Tick-timed spin clockwise
    RotateRight,
    /// Tick-timed spin counter-clockwise
    RotateLeft,
}

impl AutonChoice {
    /// Choice for a dashboard index
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(AutonChoice::DoNothing),
            1 => Some(AutonChoice::DriveForward),
            2 => Some(AutonChoice::DriveBackward),
            3 => Some(AutonChoice::RotateRight),
            4 => Some(AutonChoice::RotateLeft),
            _ => None,
        }
    }

    /// Dashboard index
    pub fn index(&self) -> i32 {
        match self {
            AutonChoice::DoNothing => 0,
            AutonChoice::DriveForward => 1,
            AutonChoice::DriveBackward => 2,
            AutonChoice::RotateRight => 3,
            AutonChoice::RotateLeft => 4,
        }
    }

    /// Choice name
    pub fn name(&self) -> &'static str {
        match self {
            AutonChoice::DoNothing => "Do Nothing",
            AutonChoice::DriveForward => "Drive Forward",
            AutonChoice::DriveBackward => "Drive Backward",
            AutonChoice::RotateRight => "Rotate Right",
            AutonChoice::RotateLeft => "Rotate Left",
        }
    }

    /// Left/right gains for the tick-timed drive
    pub fn gains(&self) -> Option<(f32, f32)> {
        match self {
            AutonChoice::DoNothing => None,
            AutonChoice::DriveForward => Some((1.0, 1.0)),
            AutonChoice::DriveBackward => Some((-1.0, -1.0)),
            AutonChoice::RotateRight => Some((1.0, -1.0)),
            AutonChoice::RotateLeft => Some((-1.0, 1.0)),
        }
    }
}

/// Commands started from dashboard buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardCommand {
    /// Zeroed drive measurement readout
    Measure,
    /// Loop timing readout
    Performance,
    /// CPU load test
    LoadTest,
    /// Command rate readout
    DebugRate,
    /// Swap front and back
    FlipFront,
    /// Toggle brake/coast
    BrakeModeToggle,
}

/// Hardware handed to [`Robot::new`]
pub struct RobotHardware {
    /// Drive motors and sensors
    pub drive: DriveHardware,
    /// Driver gamepad
    pub joystick: Box<dyn Joystick>,
}

/// Top-level robot
pub struct Robot<T: TimeSource> {
    ctx: RobotContext<T>,
    scheduler: CommandScheduler<T>,
    state: RobotState,
    debug: bool,
    auton_command: Option<&'static str>,
}

impl<T: TimeSource + 'static> Robot<T> {
    /// Build the robot, registering dashboard tunables
    ///
    /// Encoder calibration is read once here from the `CAL_*` values.
    pub fn new(hardware: RobotHardware, time: T) -> Self {
        let oi = OperatorInterface::new(hardware.joystick);

        let mut dashboard = ParameterStore::new();
        let left_scale = calibrated_scale(&mut dashboard, PARAM_CAL_EXP_L, PARAM_CAL_MEAS_L);
        let right_scale = calibrated_scale(&mut dashboard, PARAM_CAL_EXP_R, PARAM_CAL_MEAS_R);
        if DriveParams::register_defaults(&mut dashboard).is_err() {
            crate::log_error!("Robot: drive parameters not registered");
        }
        if TickTimedParams::register_defaults(&mut dashboard).is_err() {
            crate::log_error!("Robot: tick-timed parameters not registered");
        }
        if dashboard
            .register(
                PARAM_AUTON_MODE,
                ParamValue::Int(AutonChoice::default().index()),
                ParamFlags::empty(),
            )
            .is_err()
        {
            crate::log_error!("Robot: auton selector not registered");
        }

        let drive = DriveSubsystem::new(hardware.drive, left_scale, right_scale);
        let mut ctx = RobotContext::new(drive, oi, time);
        ctx.dashboard = dashboard;

        Self {
            ctx,
            scheduler: CommandScheduler::new().with_default_drive(Box::new(DriveHuman::new())),
            state: RobotState::Disabled,
            debug: false,
            auton_command: None,
        }
    }

    /// Record loop timing and publish per-side encoder values
    ///
    /// Also starts the loop timing readout.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
        self.ctx.drive.set_debug(debug);
        if debug {
            self.start_command(DashboardCommand::Performance);
        }
    }

    /// Debug mode is on
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// State seen on the last loop
    pub fn state(&self) -> RobotState {
        self.state
    }

    /// Shared robot state
    pub fn context(&self) -> &RobotContext<T> {
        &self.ctx
    }

    /// Mutable shared robot state (dashboard edits, tests)
    pub fn context_mut(&mut self) -> &mut RobotContext<T> {
        &mut self.ctx
    }

    /// Command scheduler
    pub fn scheduler(&self) -> &CommandScheduler<T> {
        &self.scheduler
    }

    /// Auton routine currently selected on the dashboard
    pub fn selected_auton(&self) -> AutonChoice {
        let index = self
            .ctx
            .dashboard
            .get_int(PARAM_AUTON_MODE, AutonChoice::default().index());
        AutonChoice::from_index(index).unwrap_or_default()
    }

    /// Start a dashboard command
    ///
    /// Returns `false` if the scheduler refused it.
    pub fn start_command(&mut self, command: DashboardCommand) -> bool {
        let boxed: Box<dyn RobotCommand<T>> = match command {
            DashboardCommand::Measure => Box::new(DriveMeasure::new()),
            DashboardCommand::Performance => Box::new(Performance::new()),
            DashboardCommand::LoadTest => Box::new(LoadTest::new()),
            DashboardCommand::DebugRate => Box::new(DebugRate::new()),
            DashboardCommand::FlipFront => Box::new(FlipFront::new()),
            DashboardCommand::BrakeModeToggle => Box::new(BrakeModeToggle::new()),
        };
        self.scheduler
            .schedule(&mut self.ctx, boxed, self.state.is_enabled())
    }

    /// Start any command
    pub fn schedule(&mut self, command: Box<dyn RobotCommand<T>>) -> bool {
        self.scheduler
            .schedule(&mut self.ctx, command, self.state.is_enabled())
    }

    /// One pass of the robot loop
    pub fn loop_func(&mut self, state: RobotState) {
        let start_us = self.ctx.time.now_us();

        if state != self.state {
            crate::log_info!("Robot: {} -> {}", self.state.name(), state.name());
            self.state = state;
            match state {
                RobotState::Disabled => self.disabled_init(),
                RobotState::Autonomous => self.autonomous_init(),
                RobotState::Teleop => self.teleop_init(),
            }
        }

        self.ctx.drive.periodic(&mut self.ctx.dashboard);

        self.ctx.oi.poll();
        if self.ctx.oi.was_pressed(FLIP_BUTTON) {
            self.start_command(DashboardCommand::FlipFront);
        }

        self.scheduler.run(&mut self.ctx, state.is_enabled());

        if self.debug {
            let secs = self.ctx.time.elapsed_secs_since(start_us);
            self.ctx.record_loop(secs);
        }
    }

    fn disabled_init(&mut self) {
        self.scheduler.cancel_drive(&mut self.ctx);
        self.ctx.drive.stop();
    }

    fn autonomous_init(&mut self) {
        let choice = self.selected_auton();
        crate::log_info!("Robot: auton {}", choice.name());
        self.auton_command = None;
        if let Some((left_gain, right_gain)) = choice.gains() {
            let command = DriveTickTimed::new(left_gain, right_gain);
            let name = RobotCommand::<T>::name(&command);
            if self.schedule(Box::new(command)) {
                self.auton_command = Some(name);
            }
        }
    }

    fn teleop_init(&mut self) {
        if let Some(name) = self.auton_command.take() {
            self.scheduler.cancel(&mut self.ctx, name);
        }
    }
}

/// Encoder scale corrected by the dashboard calibration distances
fn calibrated_scale(
    dashboard: &mut ParameterStore,
    expected: &str,
    measured: &str,
) -> EncoderScale {
    let expected_ft =
        OperatorInterface::initialize_number(dashboard, expected, DEFAULT_CAL_DISTANCE);
    let measured_ft =
        OperatorInterface::initialize_number(dashboard, measured, DEFAULT_CAL_DISTANCE);
    EncoderScale::default().calibrated(expected_ft, measured_ft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::oi::THROTTLE_AXIS;
    use crate::platform::mock::MockJoystick;
    use crate::subsystems::drive::tests::DriveMocks;
    use drivebase_core::traits::MockTime;

    struct Rig {
        robot: Robot<MockTime>,
        drive: DriveMocks,
        joystick: MockJoystick,
    }

    fn rig() -> Rig {
        let drive = DriveMocks::new();
        let joystick = MockJoystick::new();
        let hardware = RobotHardware {
            drive: DriveHardware {
                left_motor: Box::new(drive.left_motor.clone()),
                left_encoder: Box::new(drive.left_encoder.clone()),
                right_motor: Box::new(drive.right_motor.clone()),
                right_encoder: Box::new(drive.right_encoder.clone()),
                gyro: Box::new(drive.gyro.clone()),
                accelerometer: Box::new(drive.accel.clone()),
            },
            joystick: Box::new(joystick.clone()),
        };
        Rig {
            robot: Robot::new(hardware, MockTime::new()),
            drive,
            joystick,
        }
    }

    fn select_auton(robot: &mut Robot<MockTime>, choice: AutonChoice) {
        robot
            .context_mut()
            .dashboard
            .set(PARAM_AUTON_MODE, ParamValue::Int(choice.index()))
            .unwrap();
    }

    #[test]
    fn test_auton_choice_index_roundtrip() {
        for index in 0..5 {
            let choice = AutonChoice::from_index(index).unwrap();
            assert_eq!(choice.index(), index);
        }
        assert_eq!(AutonChoice::from_index(5), None);
        assert_eq!(AutonChoice::RotateLeft.gains(), Some((-1.0, 1.0)));
        assert_eq!(AutonChoice::DoNothing.gains(), None);
    }

    #[test]
    fn test_defaults_registered() {
        let rig = rig();
        let store = &rig.robot.context().dashboard;
        assert_eq!(store.get_int(PARAM_AUTON_MODE, -1), 0);
        assert!(store.get("DRV_MODE").is_some());
        assert!(store.get("TT_RAMP_TICKS").is_some());
        assert_eq!(store.get_float(PARAM_CAL_EXP_L, 0.0), DEFAULT_CAL_DISTANCE);
    }

    #[test]
    fn test_disabled_does_not_drive() {
        let mut rig = rig();
        rig.joystick.set_axis(THROTTLE_AXIS, -1.0);
        for _ in 0..5 {
            rig.robot.loop_func(RobotState::Disabled);
        }
        assert!(rig.drive.left_motor.history().iter().all(|p| *p == 0.0));
        assert_eq!(rig.robot.scheduler().drive_command_name(), None);
    }

    #[test]
    fn test_teleop_runs_default_drive() {
        let mut rig = rig();
        rig.joystick.set_axis(THROTTLE_AXIS, -1.0);
        rig.robot.loop_func(RobotState::Teleop);
        assert_eq!(rig.robot.scheduler().drive_command_name(), Some("DriveHuman"));
        assert!((rig.drive.left_motor.last_power() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_auton_do_nothing_leaves_drive_idle() {
        let mut rig = rig();
        rig.robot.loop_func(RobotState::Autonomous);
        // Default drive takes over since no auton command exists
        assert_eq!(rig.robot.scheduler().drive_command_name(), Some("DriveHuman"));
        assert!(rig.drive.left_motor.last_power() == 0.0);
    }

    #[test]
    fn test_auton_drive_forward_then_teleop_cancels() {
        let mut rig = rig();
        select_auton(&mut rig.robot, AutonChoice::DriveForward);
        rig.robot.loop_func(RobotState::Autonomous);
        assert_eq!(
            rig.robot.scheduler().drive_command_name(),
            Some("DriveTickTimed")
        );
        for _ in 0..29 {
            rig.robot.loop_func(RobotState::Autonomous);
        }
        assert!((rig.drive.left_motor.last_power() - 0.4).abs() < 1e-6);

        rig.robot.loop_func(RobotState::Teleop);
        assert_eq!(rig.robot.scheduler().drive_command_name(), Some("DriveHuman"));
        assert_eq!(rig.drive.left_motor.last_power(), 0.0);
    }

    #[test]
    fn test_auton_runs_to_completion() {
        let mut rig = rig();
        select_auton(&mut rig.robot, AutonChoice::RotateRight);
        for _ in 0..80 {
            rig.robot.loop_func(RobotState::Autonomous);
        }
        // Ramp finished on the 80th pass; DriveHuman resumes next pass
        assert_eq!(rig.robot.scheduler().drive_command_name(), None);
        let right = rig.drive.right_motor.history();
        assert!(right.iter().all(|p| *p <= 0.0));
        assert!(right.iter().any(|p| (*p + 0.4).abs() < 1e-6));
        rig.robot.loop_func(RobotState::Autonomous);
        assert_eq!(rig.robot.scheduler().drive_command_name(), Some("DriveHuman"));
    }

    #[test]
    fn test_disable_cancels_auton() {
        let mut rig = rig();
        select_auton(&mut rig.robot, AutonChoice::DriveForward);
        for _ in 0..10 {
            rig.robot.loop_func(RobotState::Autonomous);
        }
        rig.robot.loop_func(RobotState::Disabled);
        assert_eq!(rig.robot.scheduler().drive_command_name(), None);
        assert_eq!(rig.drive.left_motor.last_power(), 0.0);
    }

    #[test]
    fn test_flip_button_toggles_front() {
        let mut rig = rig();
        rig.joystick.set_button(FLIP_BUTTON, true);
        rig.robot.loop_func(RobotState::Teleop);
        assert!(rig.robot.context().config.is_flipped());
        // Held button does not flip again
        rig.robot.loop_func(RobotState::Teleop);
        assert!(rig.robot.context().config.is_flipped());
        rig.joystick.set_button(FLIP_BUTTON, false);
        rig.robot.loop_func(RobotState::Teleop);
        rig.joystick.set_button(FLIP_BUTTON, true);
        rig.robot.loop_func(RobotState::Teleop);
        assert!(!rig.robot.context().config.is_flipped());
    }

    #[test]
    fn test_measure_runs_while_disabled() {
        let mut rig = rig();
        assert!(rig.robot.start_command(DashboardCommand::Measure));
        rig.drive.left_encoder.set_counts(42);
        rig.robot.loop_func(RobotState::Disabled);
        assert_eq!(rig.robot.context().dashboard.get_int("L_CNTS", 0), 42);
        assert!(!rig.robot.start_command(DashboardCommand::DebugRate));
    }

    #[test]
    fn test_debug_records_loop_time() {
        let mut rig = rig();
        rig.robot.set_debug(true);
        assert!(rig.robot.scheduler().is_scheduled("Performance"));
        for _ in 0..3 {
            rig.robot.loop_func(RobotState::Disabled);
        }
        assert_eq!(rig.robot.context().loop_stats.count(), 3);
        assert!(rig.robot.context().dashboard.get("RUN_AVG").is_some());
    }
}
