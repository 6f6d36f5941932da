//! Drive mode selection
//!
//! Maps the selected [`DriveMode`] plus the current joystick axes to a
//! left/right [`PowerPair`]. The selector holds only configuration; each call
//! is a pure function of its inputs.

use super::mixing::{DifferentialMixer, DEFAULT_DEADBAND};
use super::power::PowerPair;

/// Joystick-to-drive mapping strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriveMode {
    /// Throttle axis drives, rotation axis turns
    #[default]
    Arcade,
    /// One axis per side
    Tank,
    /// Arcade with rotation authority proportional to throttle
    Curvature,
    /// Fixed power levels selected by stick deflection
    Fixed,
}

impl DriveMode {
    /// Decode a dashboard index (0 = arcade, 1 = tank, 2 = curvature, 3 = fixed)
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(DriveMode::Arcade),
            1 => Some(DriveMode::Tank),
            2 => Some(DriveMode::Curvature),
            3 => Some(DriveMode::Fixed),
            _ => None,
        }
    }

    /// Dashboard index of the mode
    pub fn index(&self) -> i32 {
        match self {
            DriveMode::Arcade => 0,
            DriveMode::Tank => 1,
            DriveMode::Curvature => 2,
            DriveMode::Fixed => 3,
        }
    }

    /// Mode name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            DriveMode::Arcade => "Arcade",
            DriveMode::Tank => "Tank",
            DriveMode::Curvature => "Curvature",
            DriveMode::Fixed => "Fixed",
        }
    }
}

/// Raw joystick axis readings for one tick, each in [-1.0, +1.0]
///
/// Axes follow gamepad convention: pushing a stick forward reads negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveInputs {
    /// Forward/back axis used by arcade, curvature and fixed modes
    pub throttle_axis: f32,
    /// Left/right axis used by arcade, curvature and fixed modes
    pub rotation_axis: f32,
    /// Left side axis used by tank mode
    pub left_axis: f32,
    /// Right side axis used by tank mode
    pub right_axis: f32,
}

/// Drive mode configuration (dashboard tunables)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveOptions {
    /// Selected mode
    pub mode: DriveMode,
    /// Square arcade/tank inputs for finer low-speed control
    pub square_inputs: bool,
    /// Allow curvature mode to turn in place
    pub quick_turn: bool,
    /// Left power used by fixed mode
    pub fixed_left: f32,
    /// Right power used by fixed mode
    pub fixed_right: f32,
    /// Rotation multiplier for arcade and curvature modes
    pub rotation_gain: f32,
    /// Multiplier applied to everything while slow mode is held
    pub slow_gain: f32,
    /// Minimum stick deflection recognized by fixed mode
    pub min_deflect: f32,
    /// Joystick deadband applied by the mixer
    pub deadband: f32,
}

impl Default for DriveOptions {
    fn default() -> Self {
        Self {
            mode: DriveMode::Arcade,
            square_inputs: true,
            quick_turn: false,
            fixed_left: 0.4,
            fixed_right: 0.4,
            rotation_gain: 0.5,
            slow_gain: 0.5,
            min_deflect: 1.0 / 64.0,
            deadband: DEFAULT_DEADBAND,
        }
    }
}

/// Drive mode selector
#[derive(Debug, Clone, Copy)]
pub struct DriveModeSelector {
    options: DriveOptions,
    mixer: DifferentialMixer,
}

impl Default for DriveModeSelector {
    fn default() -> Self {
        Self::new(DriveOptions::default())
    }
}

impl DriveModeSelector {
    /// Create a selector from drive options
    pub fn new(options: DriveOptions) -> Self {
        Self {
            mixer: DifferentialMixer::new(options.deadband),
            options,
        }
    }

    /// Current options
    pub fn options(&self) -> &DriveOptions {
        &self.options
    }

    /// Replace options (e.g. re-read from the dashboard on command start)
    pub fn set_options(&mut self, options: DriveOptions) {
        self.mixer.set_deadband(options.deadband);
        self.options = options;
    }

    /// Selected mode
    pub fn mode(&self) -> DriveMode {
        self.options.mode
    }

    /// Compute left/right power for this tick
    ///
    /// # Arguments
    ///
    /// * `inputs` - Raw joystick axes
    /// * `is_flipped` - Treat the back of the robot as its front
    /// * `slow_mode_active` - Slow-mode button held
    pub fn compute_power(
        &self,
        inputs: &DriveInputs,
        is_flipped: bool,
        slow_mode_active: bool,
    ) -> PowerPair {
        let opts = &self.options;
        let (gain, rot_gain) = if slow_mode_active {
            (opts.slow_gain, opts.slow_gain)
        } else {
            (1.0, opts.rotation_gain)
        };

        match opts.mode {
            DriveMode::Arcade => {
                let mut throttle = -inputs.throttle_axis * gain;
                let rotation = inputs.rotation_axis * rot_gain;
                if is_flipped {
                    throttle = -throttle;
                }
                self.mixer.arcade(throttle, rotation, opts.square_inputs)
            }
            DriveMode::Tank => {
                let mut left = -inputs.left_axis * gain;
                let mut right = -inputs.right_axis * gain;
                if is_flipped {
                    let tmp_left = -left;
                    left = -right;
                    right = tmp_left;
                }
                self.mixer.tank(left, right, opts.square_inputs)
            }
            DriveMode::Curvature => {
                let mut throttle = -inputs.throttle_axis * gain;
                let rotation = inputs.rotation_axis * rot_gain;
                if is_flipped {
                    throttle = -throttle;
                }
                self.mixer.curvature(throttle, rotation, opts.quick_turn)
            }
            DriveMode::Fixed => self.fixed(inputs, is_flipped, gain),
        }
    }

    /// Fixed mode: full fixed power once the stick leaves the center
    ///
    /// Throttle takes priority over rotation. The rotation branch uses the slow
    /// mode gain only, so `rotation_gain` never shrinks fixed turning power.
    fn fixed(&self, inputs: &DriveInputs, is_flipped: bool, gain: f32) -> PowerPair {
        let opts = &self.options;
        let mut throttle = -inputs.throttle_axis;
        let rotation = inputs.rotation_axis;
        if is_flipped {
            throttle = -throttle;
        }

        if throttle > opts.min_deflect {
            PowerPair::new(opts.fixed_left * gain, opts.fixed_right * gain)
        } else if throttle < -opts.min_deflect {
            PowerPair::new(-opts.fixed_left * gain, -opts.fixed_right * gain)
        } else if rotation > opts.min_deflect {
            PowerPair::new(opts.fixed_left * gain, -opts.fixed_right * gain)
        } else if rotation < -opts.min_deflect {
            PowerPair::new(-opts.fixed_left * gain, opts.fixed_right * gain)
        } else {
            PowerPair::STOP
        }
    }
}
