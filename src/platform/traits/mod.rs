//! Platform abstraction traits
//!
//! Hardware the drive base needs: motor controllers, encoders, gyro,
//! accelerometer and the driver's joystick.

pub mod joystick;
pub mod motor;
pub mod sensor;

pub use joystick::Joystick;
pub use motor::{NeutralMode, SpeedController};
pub use sensor::{Accelerometer, Encoder, Gyro};
