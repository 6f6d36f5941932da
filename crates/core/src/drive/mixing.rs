//! Differential drive mixing
//!
//! Converts throttle/rotation (arcade, curvature) or per-side (tank) commands into
//! left/right power. Every mixer applies the same input conditioning:
//!
//! 1. Clamp input to [-1.0, +1.0]
//! 2. Apply deadband, rescaling the remaining range so output stays continuous
//! 3. Optionally square the input, preserving sign (finer control near center)
//!
//! Outputs are clamped to [-1.0, +1.0] and multiplied by `max_output`.

use libm::{copysignf, fabsf};

use super::power::{clamp_unit, PowerPair};

/// Deadband applied to joystick inputs before mixing
pub const DEFAULT_DEADBAND: f32 = 0.025;

/// Largest deadband accepted (keeps the rescale denominator non-zero)
pub const MAX_DEADBAND: f32 = 0.95;

/// Apply a deadband to a value
///
/// Values inside `[-deadband, +deadband]` become zero. Values outside are
/// rescaled so that `deadband` maps to 0.0 and 1.0 maps to 1.0.
pub fn apply_deadband(value: f32, deadband: f32) -> f32 {
    if fabsf(value) > deadband {
        if value > 0.0 {
            (value - deadband) / (1.0 - deadband)
        } else {
            (value + deadband) / (1.0 - deadband)
        }
    } else {
        0.0
    }
}

/// Square a value while preserving its sign
#[inline]
pub fn square_preserving_sign(value: f32) -> f32 {
    copysignf(value * value, value)
}

/// Differential drive mixer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferentialMixer {
    deadband: f32,
    max_output: f32,
}

impl Default for DifferentialMixer {
    fn default() -> Self {
        Self::new(DEFAULT_DEADBAND)
    }
}

impl DifferentialMixer {
    /// Create a mixer with the given deadband and full output range
    ///
    /// The deadband is clamped to `[0.0, MAX_DEADBAND]`.
    pub fn new(deadband: f32) -> Self {
        Self {
            deadband: sanitize_deadband(deadband),
            max_output: 1.0,
        }
    }

    /// Limit the output magnitude (e.g. 0.5 for a half-speed robot)
    pub fn with_max_output(mut self, max_output: f32) -> Self {
        self.max_output = if max_output.is_nan() {
            1.0
        } else {
            max_output.clamp(0.0, 1.0)
        };
        self
    }

    /// Current deadband
    pub fn deadband(&self) -> f32 {
        self.deadband
    }

    /// Change the deadband (clamped to `[0.0, MAX_DEADBAND]`)
    pub fn set_deadband(&mut self, deadband: f32) {
        self.deadband = sanitize_deadband(deadband);
    }

    /// Current output limit
    pub fn max_output(&self) -> f32 {
        self.max_output
    }

    fn condition(&self, value: f32, square: bool) -> f32 {
        let value = apply_deadband(clamp_unit(value), self.deadband);
        if square {
            square_preserving_sign(value)
        } else {
            value
        }
    }

    /// Arcade drive: throttle moves forward/back, rotation turns (positive = clockwise)
    pub fn arcade(&self, throttle: f32, rotation: f32, square_inputs: bool) -> PowerPair {
        let x = self.condition(throttle, square_inputs);
        let z = self.condition(rotation, square_inputs);

        let max_input = copysignf(fabsf(x).max(fabsf(z)), x);

        let (left, right) = if x >= 0.0 {
            if z >= 0.0 {
                (max_input, x - z)
            } else {
                (x + z, max_input)
            }
        } else if z >= 0.0 {
            (x + z, max_input)
        } else {
            (max_input, x - z)
        };

        PowerPair::new(
            clamp_unit(left) * self.max_output,
            clamp_unit(right) * self.max_output,
        )
    }

    /// Tank drive: each input controls one side
    pub fn tank(&self, left: f32, right: f32, square_inputs: bool) -> PowerPair {
        let left = self.condition(left, square_inputs);
        let right = self.condition(right, square_inputs);
        PowerPair::new(left * self.max_output, right * self.max_output)
    }

    /// Curvature drive: rotation sets path curvature instead of turn rate
    ///
    /// Rotation authority scales with throttle magnitude, so the robot cannot
    /// turn in place unless `quick_turn` is set. With quick turn the rotation
    /// input is applied directly and any side that saturates gives its excess
    /// to the opposite side.
    pub fn curvature(&self, throttle: f32, rotation: f32, quick_turn: bool) -> PowerPair {
        let x = self.condition(throttle, false);
        let z = self.condition(rotation, false);

        let angular = if quick_turn { z } else { fabsf(x) * z };

        let mut left = x + angular;
        let mut right = x - angular;

        if quick_turn {
            if left > 1.0 {
                right -= left - 1.0;
                left = 1.0;
            } else if right > 1.0 {
                left -= right - 1.0;
                right = 1.0;
            } else if left < -1.0 {
                right -= left + 1.0;
                left = -1.0;
            } else if right < -1.0 {
                left -= right + 1.0;
                right = -1.0;
            }
        }

        // Normalize so neither side exceeds full power
        let max_magnitude = fabsf(left).max(fabsf(right));
        if max_magnitude > 1.0 {
            left /= max_magnitude;
            right /= max_magnitude;
        }

        PowerPair::new(left * self.max_output, right * self.max_output)
    }
}

fn sanitize_deadband(deadband: f32) -> f32 {
    if deadband.is_nan() {
        DEFAULT_DEADBAND
    } else {
        deadband.clamp(0.0, MAX_DEADBAND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn assert_pair(p: PowerPair, left: f32, right: f32) {
        assert!(
            (p.left - left).abs() < EPS && (p.right - right).abs() < EPS,
            "expected ({}, {}), got ({}, {})",
            left,
            right,
            p.left,
            p.right
        );
    }

    #[test]
    fn test_deadband_zeroes_small_values() {
        assert_eq!(apply_deadband(0.02, 0.025), 0.0);
        assert_eq!(apply_deadband(-0.025, 0.025), 0.0);
    }

    #[test]
    fn test_deadband_rescales() {
        assert!((apply_deadband(1.0, 0.025) - 1.0).abs() < EPS);
        assert!((apply_deadband(-1.0, 0.025) + 1.0).abs() < EPS);
        let mid = apply_deadband(0.5, 0.1);
        assert!((mid - 0.4 / 0.9).abs() < EPS);
    }

    #[test]
    fn test_square_preserves_sign() {
        assert!((square_preserving_sign(0.5) - 0.25).abs() < EPS);
        assert!((square_preserving_sign(-0.5) + 0.25).abs() < EPS);
    }

    #[test]
    fn test_deadband_is_clamped() {
        let mixer = DifferentialMixer::new(2.0);
        assert_eq!(mixer.deadband(), MAX_DEADBAND);
        let mixer = DifferentialMixer::new(-1.0);
        assert_eq!(mixer.deadband(), 0.0);
        let mixer = DifferentialMixer::new(f32::NAN);
        assert_eq!(mixer.deadband(), DEFAULT_DEADBAND);
    }

    #[test]
    fn test_arcade_straight() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.arcade(0.5, 0.0, false), 0.5, 0.5);
        assert_pair(mixer.arcade(-0.5, 0.0, false), -0.5, -0.5);
    }

    #[test]
    fn test_arcade_turn_in_place() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.arcade(0.0, 0.5, false), 0.5, -0.5);
        assert_pair(mixer.arcade(0.0, -0.5, false), -0.5, 0.5);
    }

    #[test]
    fn test_arcade_all_quadrants() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.arcade(0.6, 0.2, false), 0.6, 0.4);
        assert_pair(mixer.arcade(0.6, -0.2, false), 0.4, 0.6);
        assert_pair(mixer.arcade(-0.6, 0.2, false), -0.4, -0.6);
        assert_pair(mixer.arcade(-0.6, -0.2, false), -0.6, -0.4);
    }

    #[test]
    fn test_arcade_squared_inputs() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.arcade(0.5, 0.0, true), 0.25, 0.25);
        assert_pair(mixer.arcade(-0.5, 0.0, true), -0.25, -0.25);
    }

    #[test]
    fn test_arcade_output_clamped() {
        let mixer = DifferentialMixer::new(0.0);
        let p = mixer.arcade(1.0, 1.0, false);
        assert!(p.left <= 1.0 && p.right >= -1.0);
        assert_pair(p, 1.0, 0.0);
    }

    #[test]
    fn test_arcade_max_output() {
        let mixer = DifferentialMixer::new(0.0).with_max_output(0.5);
        assert_pair(mixer.arcade(1.0, 0.0, false), 0.5, 0.5);
    }

    #[test]
    fn test_tank() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.tank(0.3, -0.7, false), 0.3, -0.7);
        assert_pair(mixer.tank(0.5, -0.5, true), 0.25, -0.25);
        assert_pair(mixer.tank(3.0, -3.0, false), 1.0, -1.0);
    }

    #[test]
    fn test_tank_deadband() {
        let mixer = DifferentialMixer::default();
        assert_pair(mixer.tank(0.01, -0.02, false), 0.0, 0.0);
    }

    #[test]
    fn test_curvature_no_turn_at_zero_throttle() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.curvature(0.0, 0.8, false), 0.0, 0.0);
    }

    #[test]
    fn test_curvature_scales_with_throttle() {
        let mixer = DifferentialMixer::new(0.0);
        // angular = 0.5 * 0.4 = 0.2
        assert_pair(mixer.curvature(0.5, 0.4, false), 0.7, 0.3);
    }

    #[test]
    fn test_curvature_quick_turn_in_place() {
        let mixer = DifferentialMixer::new(0.0);
        assert_pair(mixer.curvature(0.0, 0.6, true), 0.6, -0.6);
    }

    #[test]
    fn test_curvature_quick_turn_over_power() {
        let mixer = DifferentialMixer::new(0.0);
        // left = 1.5 saturates, excess 0.5 removed from right (0.3 - 0.5)
        assert_pair(mixer.curvature(0.9, 0.6, true), 1.0, -0.2);
    }

    #[test]
    fn test_curvature_normalizes() {
        let mixer = DifferentialMixer::new(0.0);
        // angular = 1.0 * 1.0, left = 2.0, right = 0.0 -> normalized
        assert_pair(mixer.curvature(1.0, 1.0, false), 1.0, 0.0);
    }
}
