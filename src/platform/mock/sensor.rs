//! Mock drive sensors

use alloc::rc::Rc;
use core::cell::Cell;

use crate::platform::{
    error::{PlatformError, SensorError},
    traits::{Accelerometer, Encoder, Gyro},
    Result,
};

#[derive(Debug, Default)]
struct EncoderState {
    counts: Cell<i32>,
    rate: Cell<f32>,
    distance_per_count: Cell<f32>,
    connected: Cell<bool>,
}

/// Mock encoder with settable counts and rate
#[derive(Debug, Clone)]
pub struct MockEncoder {
    state: Rc<EncoderState>,
}

impl Default for MockEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEncoder {
    /// Connected encoder at zero counts, one foot per count
    pub fn new() -> Self {
        let state = EncoderState::default();
        state.distance_per_count.set(1.0);
        state.connected.set(true);
        Self {
            state: Rc::new(state),
        }
    }

    /// Set the raw count
    pub fn set_counts(&self, counts: i32) {
        self.state.counts.set(counts);
    }

    /// Set the reported velocity (feet per second)
    pub fn set_rate(&self, rate: f32) {
        self.state.rate.set(rate);
    }

    /// Distance per count configured by the code under test
    pub fn distance_per_count(&self) -> f32 {
        self.state.distance_per_count.get()
    }

    /// Simulate unplugging the encoder
    pub fn set_connected(&self, connected: bool) {
        self.state.connected.set(connected);
    }

    fn check(&self) -> Result<()> {
        if self.state.connected.get() {
            Ok(())
        } else {
            Err(PlatformError::Sensor(SensorError::NotConnected))
        }
    }
}

impl Encoder for MockEncoder {
    fn set_distance_per_count(&mut self, feet: f32) {
        self.state.distance_per_count.set(feet);
    }

    fn counts(&self) -> Result<i32> {
        self.check()?;
        Ok(self.state.counts.get())
    }

    fn distance(&self) -> Result<f32> {
        self.check()?;
        Ok(self.state.counts.get() as f32 * self.state.distance_per_count.get())
    }

    fn rate(&self) -> Result<f32> {
        self.check()?;
        Ok(self.state.rate.get())
    }
}

/// Mock gyro with settable yaw
#[derive(Debug, Clone, Default)]
pub struct MockGyro {
    yaw: Rc<Cell<f32>>,
}

impl MockGyro {
    /// Gyro reading zero yaw
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported yaw (degrees)
    pub fn set_yaw(&self, yaw: f32) {
        self.yaw.set(yaw);
    }
}

impl Gyro for MockGyro {
    fn yaw(&self) -> Result<f32> {
        Ok(self.yaw.get())
    }
}

/// Mock accelerometer with settable axes
#[derive(Debug, Clone, Default)]
pub struct MockAccelerometer {
    axes: Rc<Cell<[f32; 3]>>,
}

impl MockAccelerometer {
    /// Accelerometer reading zero on every axis
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported acceleration (g)
    pub fn set(&self, x: f32, y: f32, z: f32) {
        self.axes.set([x, y, z]);
    }
}

impl Accelerometer for MockAccelerometer {
    fn x(&self) -> Result<f32> {
        Ok(self.axes.get()[0])
    }

    fn y(&self) -> Result<f32> {
        Ok(self.axes.get()[1])
    }

    fn z(&self) -> Result<f32> {
        Ok(self.axes.get()[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_encoder_distance() {
        let handle = MockEncoder::new();
        let mut encoder = handle.clone();
        encoder.set_distance_per_count(0.5);
        handle.set_counts(10);
        handle.set_rate(2.0);
        assert_eq!(encoder.counts().unwrap(), 10);
        assert!((encoder.distance().unwrap() - 5.0).abs() < 1e-6);
        assert!((encoder.rate().unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_mock_encoder_disconnected() {
        let encoder = MockEncoder::new();
        encoder.set_connected(false);
        assert_eq!(
            encoder.counts(),
            Err(PlatformError::Sensor(SensorError::NotConnected))
        );
    }

    #[test]
    fn test_mock_gyro_and_accel() {
        let gyro = MockGyro::new();
        gyro.set_yaw(45.0);
        assert_eq!(gyro.yaw().unwrap(), 45.0);

        let accel = MockAccelerometer::new();
        accel.set(0.1, -0.2, 1.0);
        assert_eq!(accel.x().unwrap(), 0.1);
        assert_eq!(accel.y().unwrap(), -0.2);
        assert_eq!(accel.z().unwrap(), 1.0);
    }
}
