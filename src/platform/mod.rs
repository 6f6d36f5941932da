//! Platform abstraction layer
//!
//! Robot hardware is reached only through the traits in [`traits`]. Real
//! drivers, the simulator and the test mocks all implement the same traits.

pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{JoystickError, MotorError, PlatformError, Result, SensorError};
pub use traits::{Accelerometer, Encoder, Gyro, Joystick, NeutralMode, SpeedController};
