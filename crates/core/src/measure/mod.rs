//! Drive measurement
//!
//! Encoder count to distance conversion and "zeroed" drive measurements taken
//! relative to a baseline captured when a measurement starts.
//!
//! # Encoder calibration
//!
//! 1. Set expected and measured distances to the same value (e.g. 10 ft)
//! 2. Drive a known distance and note the distance each encoder reports
//! 3. Use the reported values as the measured distances
//!
//! The conversion is then scaled by `expected / measured` per side.

use core::f32::consts::PI;

use libm::{fabsf, roundf};

/// Drive wheel diameter in inches
pub const WHEEL_DIAMETER_IN: f32 = 6.0;

/// Encoder counts per wheel revolution
pub const ENCODER_COUNTS_PER_REV: u32 = 256;

/// Acceleration (g) above which a bump is reported
pub const DEFAULT_BUMP_G: f32 = 0.4;

/// Encoder count to distance (feet) conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderScale {
    feet_per_count: f32,
}

impl Default for EncoderScale {
    fn default() -> Self {
        Self::new(WHEEL_DIAMETER_IN, ENCODER_COUNTS_PER_REV)
    }
}

impl EncoderScale {
    /// Uncalibrated conversion for the given wheel and encoder
    pub fn new(wheel_diameter_in: f32, counts_per_rev: u32) -> Self {
        let counts = counts_per_rev.max(1) as f32;
        Self {
            feet_per_count: (wheel_diameter_in / 12.0) * (PI / counts),
        }
    }

    /// Apply a real-world correction of `expected_ft / measured_ft`
    ///
    /// Non-positive or non-finite distances leave the scale unchanged.
    pub fn calibrated(self, expected_ft: f32, measured_ft: f32) -> Self {
        let ratio = expected_ft / measured_ft;
        if expected_ft <= 0.0 || measured_ft <= 0.0 || !ratio.is_finite() {
            return self;
        }
        Self {
            feet_per_count: self.feet_per_count * ratio,
        }
    }

    /// Distance per encoder count in feet
    pub fn feet_per_count(&self) -> f32 {
        self.feet_per_count
    }

    /// Convert encoder counts to feet
    pub fn counts_to_feet(&self, counts: i32) -> f32 {
        counts as f32 * self.feet_per_count
    }

    /// Convert feet to the nearest whole encoder count
    pub fn feet_to_counts(&self, feet: f32) -> i32 {
        if self.feet_per_count == 0.0 {
            return 0;
        }
        roundf(feet / self.feet_per_count) as i32
    }
}

/// One side's encoder readings
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SideReading {
    /// Raw encoder counts
    pub counts: i32,
    /// Distance in feet
    pub distance: f32,
    /// Velocity in feet per second
    pub velocity: f32,
}

/// Drive sensor readings for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveSample {
    /// Gyro yaw in degrees
    pub yaw: f32,
    /// Left side encoder
    pub left: SideReading,
    /// Right side encoder
    pub right: SideReading,
    /// Built-in accelerometer X axis (g)
    pub accel_x: f32,
    /// Built-in accelerometer Y axis (g)
    pub accel_y: f32,
}

/// Readings captured when a measurement starts
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureBaseline {
    yaw: f32,
    left_distance: f32,
    left_counts: i32,
    right_distance: f32,
    right_counts: i32,
}

/// Drive motion relative to a [`MeasureBaseline`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveMeasurement {
    /// Gyro yaw as reported (degrees)
    pub yaw_raw: f32,
    /// Yaw change since the baseline (degrees)
    pub yaw: f32,
    /// Left distance since the baseline (feet)
    pub left_distance: f32,
    /// Left encoder counts since the baseline
    pub left_counts: i32,
    /// Left velocity (feet per second)
    pub left_velocity: f32,
    /// Right distance since the baseline (feet)
    pub right_distance: f32,
    /// Right encoder counts since the baseline
    pub right_counts: i32,
    /// Right velocity (feet per second)
    pub right_velocity: f32,
    /// Accelerometer X (g)
    pub accel_x: f32,
    /// Accelerometer Y (g)
    pub accel_y: f32,
    /// Acceleration exceeded the default bump threshold
    pub bump: bool,
}

impl MeasureBaseline {
    /// Zero point taken from the current readings
    pub fn capture(sample: &DriveSample) -> Self {
        Self {
            yaw: sample.yaw,
            left_distance: sample.left.distance,
            left_counts: sample.left.counts,
            right_distance: sample.right.distance,
            right_counts: sample.right.counts,
        }
    }

    /// Motion since this baseline
    pub fn measure(&self, sample: &DriveSample) -> DriveMeasurement {
        DriveMeasurement {
            yaw_raw: sample.yaw,
            yaw: sample.yaw - self.yaw,
            left_distance: sample.left.distance - self.left_distance,
            left_counts: sample.left.counts.wrapping_sub(self.left_counts),
            left_velocity: sample.left.velocity,
            right_distance: sample.right.distance - self.right_distance,
            right_counts: sample.right.counts.wrapping_sub(self.right_counts),
            right_velocity: sample.right.velocity,
            accel_x: sample.accel_x,
            accel_y: sample.accel_y,
            bump: bump_check(sample.accel_x, sample.accel_y, DEFAULT_BUMP_G, DEFAULT_BUMP_G),
        }
    }
}

/// True if either acceleration magnitude exceeds its threshold
pub fn bump_check(accel_x: f32, accel_y: f32, bump_x: f32, bump_y: f32) -> bool {
    fabsf(accel_x) > bump_x || fabsf(accel_y) > bump_y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scale() {
        let scale = EncoderScale::default();
        // One revolution of a 6 inch wheel is pi/2 feet
        let rev = scale.counts_to_feet(256);
        assert!((rev - PI / 2.0).abs() < 1e-5);
        assert_eq!(scale.feet_to_counts(PI / 2.0), 256);
    }

    #[test]
    fn test_calibration_ratio() {
        let scale = EncoderScale::default().calibrated(10.0, 8.0);
        let base = EncoderScale::default();
        assert!((scale.feet_per_count() - base.feet_per_count() * 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_bad_calibration_ignored() {
        let base = EncoderScale::default();
        assert_eq!(base.calibrated(10.0, 0.0), base);
        assert_eq!(base.calibrated(-1.0, 10.0), base);
        assert_eq!(base.calibrated(f32::NAN, 10.0), base);
    }

    #[test]
    fn test_measurement_deltas() {
        let start = DriveSample {
            yaw: 10.0,
            left: SideReading {
                counts: 100,
                distance: 1.0,
                velocity: 0.0,
            },
            right: SideReading {
                counts: 120,
                distance: 1.2,
                velocity: 0.0,
            },
            ..Default::default()
        };
        let baseline = MeasureBaseline::capture(&start);

        let now = DriveSample {
            yaw: 25.0,
            left: SideReading {
                counts: 612,
                distance: 5.0,
                velocity: 2.5,
            },
            right: SideReading {
                counts: 400,
                distance: 3.2,
                velocity: 1.5,
            },
            accel_x: 0.1,
            accel_y: -0.5,
        };
        let m = baseline.measure(&now);
        assert!((m.yaw_raw - 25.0).abs() < 1e-5);
        assert!((m.yaw - 15.0).abs() < 1e-5);
        assert!((m.left_distance - 4.0).abs() < 1e-5);
        assert_eq!(m.left_counts, 512);
        assert!((m.right_distance - 2.0).abs() < 1e-5);
        assert_eq!(m.right_counts, 280);
        assert!((m.left_velocity - 2.5).abs() < 1e-5);
        assert!((m.right_velocity - 1.5).abs() < 1e-5);
        assert!(m.bump);
    }

    #[test]
    fn test_bump_check() {
        assert!(!bump_check(0.39, -0.39, 0.4, 0.4));
        assert!(bump_check(-0.41, 0.0, 0.4, 0.4));
        assert!(bump_check(0.0, 0.5, 0.4, 0.4));
        assert!(!bump_check(0.4, 0.4, 0.4, 0.4));
    }
}
