//! Left/right power command type

/// Left/right motor power command
///
/// Values are normalized to [-1.0, +1.0]:
/// - `+1.0` = full forward
/// - `0.0` = stopped
/// - `-1.0` = full reverse
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerPair {
    /// Left side power
    pub left: f32,
    /// Right side power
    pub right: f32,
}

impl PowerPair {
    /// Both sides stopped
    pub const STOP: PowerPair = PowerPair {
        left: 0.0,
        right: 0.0,
    };

    /// Create a power pair, clamping each side to [-1.0, +1.0]
    ///
    /// NaN inputs are treated as zero so a bad upstream value never reaches a motor.
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: clamp_unit(left),
            right: clamp_unit(right),
        }
    }

    /// Scale both sides by the same factor (result is clamped)
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.left * factor, self.right * factor)
    }

    /// Check if both sides are exactly zero
    pub fn is_stopped(&self) -> bool {
        self.left == 0.0 && self.right == 0.0
    }

    /// Larger of the two side magnitudes
    pub fn max_magnitude(&self) -> f32 {
        libm::fabsf(self.left).max(libm::fabsf(self.right))
    }
}

/// Clamp a value to [-1.0, +1.0], mapping NaN to 0.0
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}
