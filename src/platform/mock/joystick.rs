//! Mock driver joystick

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::platform::{
    error::{JoystickError, PlatformError},
    traits::Joystick,
    Result,
};

/// Axes on the mock gamepad
pub const MOCK_AXIS_COUNT: usize = 6;

/// Buttons on the mock gamepad
pub const MOCK_BUTTON_COUNT: usize = 12;

#[derive(Debug)]
struct JoystickState {
    axes: [f32; MOCK_AXIS_COUNT],
    buttons: [bool; MOCK_BUTTON_COUNT],
    connected: bool,
}

/// Mock gamepad with settable axes and buttons
#[derive(Debug, Clone)]
pub struct MockJoystick {
    state: Rc<RefCell<JoystickState>>,
}

impl Default for MockJoystick {
    fn default() -> Self {
        Self::new()
    }
}

impl MockJoystick {
    /// Connected gamepad, sticks centered, no buttons held
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(JoystickState {
                axes: [0.0; MOCK_AXIS_COUNT],
                buttons: [false; MOCK_BUTTON_COUNT],
                connected: true,
            })),
        }
    }

    /// Set an axis (ignored if out of range)
    pub fn set_axis(&self, axis: u8, value: f32) {
        if let Some(slot) = self.state.borrow_mut().axes.get_mut(axis as usize) {
            *slot = value;
        }
    }

    /// Press or release a button (1-based, ignored if out of range)
    pub fn set_button(&self, button: u8, pressed: bool) {
        let index = (button as usize).wrapping_sub(1);
        if let Some(slot) = self.state.borrow_mut().buttons.get_mut(index) {
            *slot = pressed;
        }
    }

    /// Center all axes and release all buttons
    pub fn release_all(&self) {
        let mut state = self.state.borrow_mut();
        state.axes = [0.0; MOCK_AXIS_COUNT];
        state.buttons = [false; MOCK_BUTTON_COUNT];
    }

    /// Simulate unplugging the gamepad
    pub fn set_connected(&self, connected: bool) {
        self.state.borrow_mut().connected = connected;
    }
}

impl Joystick for MockJoystick {
    fn raw_axis(&self, axis: u8) -> Result<f32> {
        let state = self.state.borrow();
        if !state.connected {
            return Err(PlatformError::Joystick(JoystickError::Disconnected));
        }
        state
            .axes
            .get(axis as usize)
            .copied()
            .ok_or(PlatformError::Joystick(JoystickError::InvalidAxis))
    }

    fn raw_button(&self, button: u8) -> Result<bool> {
        let state = self.state.borrow();
        if !state.connected {
            return Err(PlatformError::Joystick(JoystickError::Disconnected));
        }
        let index = (button as usize).wrapping_sub(1);
        state
            .buttons
            .get(index)
            .copied()
            .ok_or(PlatformError::Joystick(JoystickError::InvalidButton))
    }
}
