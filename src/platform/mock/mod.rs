//! Mock hardware for testing
//!
//! Each mock is a cheap handle around shared state: keep a clone in the test
//! and hand the other to the code under test, then drive inputs or inspect
//! outputs through the kept clone.
//!
//! # Feature Gate
//!
//! Available in test builds and with the `mock` feature.
//!
//! # Example
//!
//! ```ignore
//! use drivebase::platform::mock::MockSpeedController;
//! use drivebase::platform::SpeedController;
//!
//! let motor = MockSpeedController::new();
//! let mut boxed: Box<dyn SpeedController> = Box::new(motor.clone());
//! boxed.set_power(0.5).unwrap();
//! assert_eq!(motor.last_power(), 0.5);
//! ```

#![cfg(any(test, feature = "mock"))]

mod joystick;
mod motor;
mod sensor;

pub use joystick::{MockJoystick, MOCK_AXIS_COUNT, MOCK_BUTTON_COUNT};
pub use motor::MockSpeedController;
pub use sensor::{MockAccelerometer, MockEncoder, MockGyro};
