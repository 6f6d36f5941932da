//! Simulated robot hardware
//!
//! Motors, encoders, gyro and accelerometer share one [`DrivetrainModel`]
//! through [`SharedModel`]. The joystick is a shared handle the harness (or
//! a test) moves between loop passes.

use std::sync::{Arc, Mutex, MutexGuard};

use drivebase::platform::{
    Accelerometer, Encoder, Gyro, Joystick, JoystickError, MotorError, NeutralMode,
    PlatformError, Result, SpeedController,
};
use drivebase::robot::RobotHardware;
use drivebase::subsystems::DriveHardware;

use crate::physics::{DrivetrainModel, Side};

/// Model handle shared by every simulated device
pub type SharedModel = Arc<Mutex<DrivetrainModel>>;

/// Highest voltage compensation a simulated controller accepts
const MAX_COMPENSATION_VOLTS: f32 = 16.0;

/// Number of simulated joystick axes
pub const SIM_AXIS_COUNT: usize = 6;

/// Number of simulated joystick buttons
pub const SIM_BUTTON_COUNT: usize = 12;

/// Lock the model, recovering the state if a holder panicked
pub fn lock(model: &SharedModel) -> MutexGuard<'_, DrivetrainModel> {
    model.lock().unwrap_or_else(|e| e.into_inner())
}

/// Simulated speed controller driving one side of the model
#[derive(Clone)]
pub struct SimMotor {
    model: SharedModel,
    side: Side,
    power: f32,
    voltage: f32,
}

impl SimMotor {
    pub fn new(model: SharedModel, side: Side) -> Self {
        Self {
            model,
            side,
            power: 0.0,
            voltage: 0.0,
        }
    }

    /// Voltage compensation last applied
    pub fn voltage_compensation(&self) -> f32 {
        self.voltage
    }
}

impl SpeedController for SimMotor {
    fn set_power(&mut self, power: f32) -> Result<()> {
        if !(-1.0..=1.0).contains(&power) {
            return Err(PlatformError::Motor(MotorError::InvalidPower));
        }
        self.power = power;
        lock(&self.model).set_power(self.side, power);
        Ok(())
    }

    fn power(&self) -> f32 {
        self.power
    }

    fn set_neutral_mode(&mut self, mode: NeutralMode) -> Result<()> {
        lock(&self.model).set_brake(self.side, mode == NeutralMode::Brake);
        Ok(())
    }

    fn set_voltage_compensation(&mut self, volts: f32) -> Result<()> {
        if !(0.0..=MAX_COMPENSATION_VOLTS).contains(&volts) {
            return Err(PlatformError::Motor(MotorError::InvalidVoltage));
        }
        self.voltage = volts;
        Ok(())
    }
}

/// Simulated quadrature encoder
///
/// Counts are the model distance quantized to whole counts, so distance
/// reads back in multiples of the distance per count.
pub struct SimEncoder {
    model: SharedModel,
    side: Side,
    distance_per_count: f32,
}

impl SimEncoder {
    pub fn new(model: SharedModel, side: Side) -> Self {
        Self {
            model,
            side,
            distance_per_count: 1.0,
        }
    }
}

impl Encoder for SimEncoder {
    fn set_distance_per_count(&mut self, feet: f32) {
        self.distance_per_count = feet;
    }

    fn counts(&self) -> Result<i32> {
        if self.distance_per_count == 0.0 {
            return Ok(0);
        }
        let distance = lock(&self.model).side(self.side).distance;
        Ok((distance / self.distance_per_count).round() as i32)
    }

    fn distance(&self) -> Result<f32> {
        Ok(self.counts()? as f32 * self.distance_per_count)
    }

    fn rate(&self) -> Result<f32> {
        Ok(lock(&self.model).measured_velocity(self.side))
    }
}

/// Simulated gyro
pub struct SimGyro {
    model: SharedModel,
}

impl SimGyro {
    pub fn new(model: SharedModel) -> Self {
        Self { model }
    }
}

impl Gyro for SimGyro {
    fn yaw(&self) -> Result<f32> {
        Ok(lock(&self.model).measured_heading_deg())
    }
}

/// Simulated built-in accelerometer (Z reads 1 g)
pub struct SimAccelerometer {
    model: SharedModel,
}

impl SimAccelerometer {
    pub fn new(model: SharedModel) -> Self {
        Self { model }
    }
}

impl Accelerometer for SimAccelerometer {
    fn x(&self) -> Result<f32> {
        Ok(lock(&self.model).accel_g()[0])
    }

    fn y(&self) -> Result<f32> {
        Ok(lock(&self.model).accel_g()[1])
    }

    fn z(&self) -> Result<f32> {
        Ok(1.0)
    }
}

#[derive(Debug, Default)]
struct JoystickState {
    axes: [f32; SIM_AXIS_COUNT],
    buttons: [bool; SIM_BUTTON_COUNT],
}

/// Simulated driver gamepad
///
/// Clones share state: keep one handle to move the sticks while the robot
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct SimJoystick {
    state: Arc<Mutex<JoystickState>>,
}

impl SimJoystick {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, JoystickState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Move an axis (clamped to [-1.0, +1.0]); out of range axes are ignored
    pub fn set_axis(&self, axis: u8, value: f32) {
        if let Some(slot) = self.state().axes.get_mut(axis as usize) {
            *slot = value.clamp(-1.0, 1.0);
        }
    }

    /// Press or release a 1-based button
    pub fn set_button(&self, button: u8, pressed: bool) {
        let index = (button as usize).wrapping_sub(1);
        if let Some(slot) = self.state().buttons.get_mut(index) {
            *slot = pressed;
        }
    }

    /// Center all axes and release all buttons
    pub fn release_all(&self) {
        *self.state() = JoystickState::default();
    }
}

impl Joystick for SimJoystick {
    fn raw_axis(&self, axis: u8) -> Result<f32> {
        self.state()
            .axes
            .get(axis as usize)
            .copied()
            .ok_or(PlatformError::Joystick(JoystickError::InvalidAxis))
    }

    fn raw_button(&self, button: u8) -> Result<bool> {
        let index = (button as usize).wrapping_sub(1);
        self.state()
            .buttons
            .get(index)
            .copied()
            .ok_or(PlatformError::Joystick(JoystickError::InvalidButton))
    }
}

/// Wire a full robot to the model and joystick
pub fn robot_hardware(model: &SharedModel, joystick: &SimJoystick) -> RobotHardware {
    RobotHardware {
        drive: DriveHardware {
            left_motor: Box::new(SimMotor::new(model.clone(), Side::Left)),
            left_encoder: Box::new(SimEncoder::new(model.clone(), Side::Left)),
            right_motor: Box::new(SimMotor::new(model.clone(), Side::Right)),
            right_encoder: Box::new(SimEncoder::new(model.clone(), Side::Right)),
            gyro: Box::new(SimGyro::new(model.clone())),
            accelerometer: Box::new(SimAccelerometer::new(model.clone())),
        },
        joystick: Box::new(joystick.clone()),
    }
}
