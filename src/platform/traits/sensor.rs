//! Drive sensor interfaces

use crate::platform::Result;

/// Quadrature wheel encoder
pub trait Encoder {
    /// Set the distance (feet) travelled per encoder count
    fn set_distance_per_count(&mut self, feet: f32);

    /// Raw counts since reset
    fn counts(&self) -> Result<i32>;

    /// Distance since reset in feet
    fn distance(&self) -> Result<f32>;

    /// Velocity in feet per second
    fn rate(&self) -> Result<f32>;
}

/// Heading sensor
pub trait Gyro {
    /// Yaw in degrees (positive clockwise)
    fn yaw(&self) -> Result<f32>;
}

/// Three-axis accelerometer reporting in g
pub trait Accelerometer {
    /// Acceleration along the robot's X axis
    fn x(&self) -> Result<f32>;

    /// Acceleration along the robot's Y axis
    fn y(&self) -> Result<f32>;

    /// Acceleration along the robot's Z axis
    fn z(&self) -> Result<f32>;
}
