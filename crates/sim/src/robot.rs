//! Simulated robot harness
//!
//! Steps the robot loop, the drivetrain model, simulated time and the driver
//! station in lock step, one 20 ms tick at a time.

use std::sync::{Arc, Mutex, MutexGuard};

use drivebase::robot::{AutonChoice, Robot, RobotState, LOOP_PERIOD_US, PARAM_AUTON_MODE};
use drivebase_core::command::Session;
use drivebase_core::drive::PowerPair;
use drivebase_core::parameters::ParamValue;
use drivebase_core::sequencer::{RampPhase, RampSequencer};

use crate::driver_station::DriverStationSim;
use crate::error::SimError;
use crate::hardware::{self, SharedModel, SimJoystick};
use crate::physics::{DrivetrainModel, ModelConfig, Side};
use crate::time::SimTimeSource;

/// Loop period in seconds
pub const DT_SECS: f32 = LOOP_PERIOD_US as f32 / 1_000_000.0;

/// Longest ramp the harness will run (five minutes of ticks)
pub const MAX_RAMP_TICKS: u32 = 15_000;

/// Dashboard value holding seconds left in the current match period
pub const PARAM_GAME_TIME: &str = "GAME_TIME";

/// Velocities and distance over one ramp phase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseReport {
    pub phase: RampPhase,
    /// Ticks spent in the phase
    pub ticks: u32,
    /// Mean left encoder velocity (ft/s)
    pub left_velocity: f32,
    /// Mean right encoder velocity (ft/s)
    pub right_velocity: f32,
    /// Forward distance covered (ft)
    pub distance: f32,
}

/// Result of [`SimRobot::run_ramp`]
#[derive(Debug, Clone, PartialEq)]
pub struct RampReport {
    /// One entry per phase, in order
    pub phases: Vec<PhaseReport>,
    /// Total ticks run
    pub ticks: u32,
    /// Forward distance over the whole ramp (ft)
    pub distance: f32,
    /// Heading change over the whole ramp (degrees)
    pub heading_deg: f32,
}

impl RampReport {
    /// Report for one phase
    pub fn phase(&self, phase: RampPhase) -> Option<&PhaseReport> {
        self.phases.iter().find(|p| p.phase == phase)
    }
}

/// Robot wired to simulated hardware
pub struct SimRobot {
    robot: Robot<SimTimeSource>,
    model: SharedModel,
    joystick: SimJoystick,
    time: SimTimeSource,
    ds: DriverStationSim,
}

impl SimRobot {
    /// Build a robot at rest, disabled, at the start of a match
    pub fn new(config: ModelConfig) -> Self {
        let model: SharedModel = Arc::new(Mutex::new(DrivetrainModel::new(config)));
        let joystick = SimJoystick::new();
        let time = SimTimeSource::new();
        let robot = Robot::new(hardware::robot_hardware(&model, &joystick), time.clone());
        Self {
            robot,
            model,
            joystick,
            time,
            ds: DriverStationSim::new(),
        }
    }

    pub fn robot(&self) -> &Robot<SimTimeSource> {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot<SimTimeSource> {
        &mut self.robot
    }

    /// Driver gamepad handle
    pub fn joystick(&self) -> &SimJoystick {
        &self.joystick
    }

    /// Lock the drivetrain model
    pub fn model(&self) -> MutexGuard<'_, DrivetrainModel> {
        hardware::lock(&self.model)
    }

    pub fn time(&self) -> &SimTimeSource {
        &self.time
    }

    pub fn driver_station(&self) -> &DriverStationSim {
        &self.ds
    }

    /// Set a dashboard value
    pub fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), SimError> {
        self.robot.context_mut().dashboard.set(name, value)?;
        Ok(())
    }

    /// Select the autonomous routine
    pub fn set_auton(&mut self, choice: AutonChoice) -> Result<(), SimError> {
        self.set_parameter(PARAM_AUTON_MODE, ParamValue::Int(choice.index()))
    }

    /// One tick in the state the driver station reports
    pub fn step(&mut self) {
        let state = self.ds.state();
        self.step_in(state);
        self.ds.advance(LOOP_PERIOD_US);
        let game_time = self.ds.game_time();
        self.robot.context_mut().publish(PARAM_GAME_TIME, game_time);
    }

    /// One tick in a given state, leaving the driver station alone
    pub fn step_in(&mut self, state: RobotState) {
        self.robot.loop_func(state);
        hardware::lock(&self.model).step(DT_SECS);
        self.time.advance_us(LOOP_PERIOD_US);
    }

    /// Follow the driver station for `secs` seconds
    ///
    /// Returns the number of ticks run.
    pub fn run_match(&mut self, secs: f32) -> u32 {
        let ticks = (secs.max(0.0) / DT_SECS).round() as u32;
        for _ in 0..ticks {
            self.step();
        }
        ticks
    }

    /// Drive a tick-timed ramp directly and report per-phase velocities
    ///
    /// The ramp runs outside the command scheduler; the drive is stopped on
    /// return. The stop is applied without simulating another tick.
    pub fn run_ramp(
        &mut self,
        ramp_ticks: u32,
        cruise_ticks: u32,
        left: f32,
        right: f32,
    ) -> Result<RampReport, SimError> {
        for (side, power) in [("left", left), ("right", right)] {
            if !(-1.0..=1.0).contains(&power) {
                return Err(SimError::InvalidArgument(format!(
                    "{side} power {power} outside [-1, 1]"
                )));
            }
        }
        let mut sequencer = RampSequencer::new(ramp_ticks, cruise_ticks, left, right);
        if sequencer.total_ticks() > MAX_RAMP_TICKS {
            return Err(SimError::InvalidArgument(format!(
                "ramp of {} ticks exceeds {MAX_RAMP_TICKS}",
                sequencer.total_ticks()
            )));
        }

        let model = &self.model;
        let time = &self.time;
        let (start_distance, start_heading) = {
            let m = hardware::lock(model);
            (forward_distance(&m), m.heading_deg())
        };

        let mut phases: Vec<PhaseReport> = Vec::new();
        let drive = &mut self.robot.context_mut().drive;
        let mut sink = |power: PowerPair| drive.apply_power(power);

        let mut session = Session::start(&mut sequencer, &mut sink);
        while !session.is_finished() {
            let phase = session.machine().phase();
            let before = forward_distance(&hardware::lock(model));
            session.tick();
            hardware::lock(model).step(DT_SECS);
            time.advance_us(LOOP_PERIOD_US);

            let mut m = hardware::lock(model);
            let left_velocity = m.measured_velocity(Side::Left);
            let right_velocity = m.measured_velocity(Side::Right);
            let distance = forward_distance(&m) - before;
            match phases.last_mut() {
                Some(report) if report.phase == phase => {
                    report.ticks += 1;
                    report.left_velocity += left_velocity;
                    report.right_velocity += right_velocity;
                    report.distance += distance;
                }
                _ => phases.push(PhaseReport {
                    phase,
                    ticks: 1,
                    left_velocity,
                    right_velocity,
                    distance,
                }),
            }
        }
        let ticks = session.ticks();
        session.finish();

        // Sums to means
        for report in &mut phases {
            report.left_velocity /= report.ticks as f32;
            report.right_velocity /= report.ticks as f32;
        }

        let m = hardware::lock(model);
        Ok(RampReport {
            phases,
            ticks,
            distance: forward_distance(&m) - start_distance,
            heading_deg: m.heading_deg() - start_heading,
        })
    }
}

fn forward_distance(model: &DrivetrainModel) -> f32 {
    (model.side(Side::Left).distance + model.side(Side::Right).distance) / 2.0
}
