//! Driver joystick interface

use crate::platform::Result;

/// Driver station joystick
///
/// Axis indices are 0-based, button numbers 1-based (matching the labels on
/// the controller).
pub trait Joystick {
    /// Axis value in [-1.0, +1.0]
    fn raw_axis(&self, axis: u8) -> Result<f32>;

    /// True while the button is held
    fn raw_button(&self, button: u8) -> Result<bool>;
}
