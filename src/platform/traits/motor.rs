//! Motor controller interface

use crate::platform::Result;

/// Behavior of a motor controller when commanded power is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeutralMode {
    /// Short the motor windings so the robot stops quickly
    Brake,
    /// Let the robot roll freely
    #[default]
    Coast,
}

impl NeutralMode {
    /// Brake when `enable`, coast otherwise
    pub fn from_brake(enable: bool) -> Self {
        if enable {
            NeutralMode::Brake
        } else {
            NeutralMode::Coast
        }
    }
}

/// Speed controller for one side of the drive base
///
/// Follower controllers on the same side are wired by the implementation and
/// mirror the leader.
pub trait SpeedController {
    /// Command power in [-1.0, +1.0] (positive drives the robot forward)
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Motor(MotorError::InvalidPower)` for values
    /// outside the range or NaN.
    fn set_power(&mut self, power: f32) -> Result<()>;

    /// Last commanded power
    fn power(&self) -> f32;

    /// Select brake or coast at zero power
    fn set_neutral_mode(&mut self, mode: NeutralMode) -> Result<()>;

    /// Map full power to `volts` so output is consistent as the battery sags
    fn set_voltage_compensation(&mut self, volts: f32) -> Result<()>;
}
