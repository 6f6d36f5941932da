//! Operator interface
//!
//! Maps the driver's gamepad onto drive inputs and button events, and seeds
//! dashboard tunables.
//!
//! ## Gamepad layout
//!
//! | Control          | Id |
//! |------------------|----|
//! | Throttle (arcade)| axis 1 (left stick Y) |
//! | Rotation         | axis 4 (right stick X) |
//! | Left (tank)      | axis 1 |
//! | Right (tank)     | axis 3 |
//! | Flip front       | button 5 |
//! | Slow mode        | button 6 (held) |
//!
//! Button presses are reported once per press: [`OperatorInterface::poll`]
//! samples every button at the start of a loop and records rising edges.

use alloc::boxed::Box;

use drivebase_core::drive::DriveInputs;
use drivebase_core::parameters::{ParamFlags, ParamValue, ParameterStore};

use crate::platform::Joystick;

/// Arcade/curvature throttle axis
pub const THROTTLE_AXIS: u8 = 1;
/// Arcade/curvature rotation axis
pub const ROTATION_AXIS: u8 = 4;
/// Tank left axis
pub const LEFT_AXIS: u8 = 1;
/// Tank right axis
pub const RIGHT_AXIS: u8 = 3;
/// Flip-front button
pub const FLIP_BUTTON: u8 = 5;
/// Slow-mode button
pub const SLOW_BUTTON: u8 = 6;
/// Buttons sampled by [`OperatorInterface::poll`]
pub const BUTTON_COUNT: u8 = 12;

/// Driver gamepad state
pub struct OperatorInterface {
    joystick: Box<dyn Joystick>,
    held: u32,
    pressed: u32,
}

impl OperatorInterface {
    /// Wrap the driver's gamepad
    pub fn new(joystick: Box<dyn Joystick>) -> Self {
        Self {
            joystick,
            held: 0,
            pressed: 0,
        }
    }

    /// Read an axis, 0.0 if the gamepad cannot be read
    pub fn read_axis(&self, axis: u8) -> f32 {
        match self.joystick.raw_axis(axis) {
            Ok(value) if value.is_finite() => value,
            Ok(_) => 0.0,
            Err(_) => {
                crate::log_debug!("OI: axis {} unavailable", axis);
                0.0
            }
        }
    }

    /// Read a button directly, false if the gamepad cannot be read
    pub fn read_button(&self, button: u8) -> bool {
        self.joystick.raw_button(button).unwrap_or(false)
    }

    /// Sample all buttons and record presses since the previous poll
    pub fn poll(&mut self) {
        let mut now = 0u32;
        for button in 1..=BUTTON_COUNT {
            if self.read_button(button) {
                now |= Self::mask(button);
            }
        }
        self.pressed = now & !self.held;
        self.held = now;
    }

    /// Button went down between the last two polls
    pub fn was_pressed(&self, button: u8) -> bool {
        self.pressed & Self::mask(button) != 0
    }

    /// Button held at the last poll
    pub fn is_held(&self, button: u8) -> bool {
        self.held & Self::mask(button) != 0
    }

    /// Slow-mode button held
    pub fn slow_mode_active(&self) -> bool {
        self.is_held(SLOW_BUTTON)
    }

    /// Current drive axes
    pub fn drive_inputs(&self) -> DriveInputs {
        DriveInputs {
            throttle_axis: self.read_axis(THROTTLE_AXIS),
            rotation_axis: self.read_axis(ROTATION_AXIS),
            left_axis: self.read_axis(LEFT_AXIS),
            right_axis: self.read_axis(RIGHT_AXIS),
        }
    }

    /// Register a numeric tunable (if new) and return its current value
    pub fn initialize_number(store: &mut ParameterStore, name: &str, default: f32) -> f32 {
        if store
            .register(name, ParamValue::Float(default), ParamFlags::empty())
            .is_err()
        {
            crate::log_warn!("OI: cannot register {}", name);
        }
        store.get_float(name, default)
    }

    /// Register a boolean tunable (if new) and return its current value
    pub fn initialize_bool(store: &mut ParameterStore, name: &str, default: bool) -> bool {
        if store
            .register(name, ParamValue::Bool(default), ParamFlags::empty())
            .is_err()
        {
            crate::log_warn!("OI: cannot register {}", name);
        }
        store.get_bool(name, default)
    }

    fn mask(button: u8) -> u32 {
        if (1..=BUTTON_COUNT).contains(&button) {
            1 << (button - 1)
        } else {
            0
        }
    }
}
