//! Persistent drivetrain options
//!
//! Which end of the robot is the front, and whether the motor controllers brake
//! or coast at zero power. Both persist across drive commands and only change
//! through explicit toggles.

/// Operator-selected drivetrain options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrivetrainConfig {
    flipped: bool,
    brake_mode: bool,
}

impl DrivetrainConfig {
    /// Front is the front, motors coast
    pub const fn new() -> Self {
        Self {
            flipped: false,
            brake_mode: false,
        }
    }

    /// Back of the robot is treated as the front
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Motor controllers brake at zero power
    pub fn brake_mode(&self) -> bool {
        self.brake_mode
    }

    /// Swap front and back, returning the new state
    pub fn toggle_flip(&mut self) -> bool {
        self.flipped = !self.flipped;
        self.flipped
    }

    /// Switch between brake and coast, returning the new state
    pub fn toggle_brake(&mut self) -> bool {
        self.brake_mode = !self.brake_mode;
        self.brake_mode
    }
}
