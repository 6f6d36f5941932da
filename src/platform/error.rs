//! Platform error types

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// Hardware drivers map their vendor-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// Motor controller operation failed
    Motor(MotorError),
    /// Encoder, gyro or accelerometer read failed
    Sensor(SensorError),
    /// Driver joystick read failed
    Joystick(JoystickError),
}

/// Motor controller errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Power outside [-1.0, +1.0] or not a number
    InvalidPower,
    /// Voltage compensation outside the supported range
    InvalidVoltage,
    /// Controller reported a fault or stopped responding
    Fault,
}

/// Sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Sensor not present on the bus
    NotConnected,
    /// Read returned no data
    ReadFailed,
}

/// Joystick errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoystickError {
    /// No joystick on the driver station port
    Disconnected,
    /// Axis index not present on this joystick
    InvalidAxis,
    /// Button number not present on this joystick
    InvalidButton,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Motor(e) => write!(f, "motor error: {:?}", e),
            PlatformError::Sensor(e) => write!(f, "sensor error: {:?}", e),
            PlatformError::Joystick(e) => write!(f, "joystick error: {:?}", e),
        }
    }
}

impl core::error::Error for PlatformError {}
