//! Human drive parameters
//!
//! # Parameters
//!
//! - `DRV_MODE` - Drive mode (0=arcade, 1=tank, 2=curvature, 3=fixed)
//! - `DRV_SQUARE` - Square arcade/tank inputs
//! - `DRV_QUICK_TURN` - Allow curvature mode to turn in place
//! - `DRV_FIXED_LEFT` - Left power for fixed mode and tick-timed drives
//! - `DRV_FIXED_RIGHT` - Right power for fixed mode and tick-timed drives
//! - `DRV_ROT_GAIN` - Rotation gain for arcade and curvature
//! - `DRV_SLOW_GAIN` - Gain while the slow button is held
//! - `DRV_MIN_DEFLECT` - Minimum stick deflection for fixed mode
//! - `DRV_DEADBAND` - Joystick deadband

use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::drive::mixing::{DEFAULT_DEADBAND, MAX_DEADBAND};
use crate::drive::selector::{DriveMode, DriveOptions};

pub const PARAM_MODE: &str = "DRV_MODE";
pub const PARAM_SQUARE: &str = "DRV_SQUARE";
pub const PARAM_QUICK_TURN: &str = "DRV_QUICK_TURN";
pub const PARAM_FIXED_LEFT: &str = "DRV_FIXED_LEFT";
pub const PARAM_FIXED_RIGHT: &str = "DRV_FIXED_RIGHT";
pub const PARAM_ROT_GAIN: &str = "DRV_ROT_GAIN";
pub const PARAM_SLOW_GAIN: &str = "DRV_SLOW_GAIN";
pub const PARAM_MIN_DEFLECT: &str = "DRV_MIN_DEFLECT";
pub const PARAM_DEADBAND: &str = "DRV_DEADBAND";

/// Default fixed power for each side
pub const DEFAULT_FIXED_POWER: f32 = 0.4;

/// Human drive parameters loaded from the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DriveParams {
    /// Drive mode options handed to the selector
    pub options: DriveOptions,
}

impl DriveParams {
    /// Register drive parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        let d = DriveOptions::default();
        store.register(
            PARAM_MODE,
            ParamValue::Int(d.mode.index()),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_SQUARE,
            ParamValue::Bool(d.square_inputs),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_QUICK_TURN,
            ParamValue::Bool(d.quick_turn),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_FIXED_LEFT,
            ParamValue::Float(d.fixed_left),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_FIXED_RIGHT,
            ParamValue::Float(d.fixed_right),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_ROT_GAIN,
            ParamValue::Float(d.rotation_gain),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_SLOW_GAIN,
            ParamValue::Float(d.slow_gain),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_MIN_DEFLECT,
            ParamValue::Float(d.min_deflect),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_DEADBAND,
            ParamValue::Float(d.deadband),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load drive parameters, clamping malformed values
    pub fn from_store(store: &ParameterStore) -> Self {
        let d = DriveOptions::default();

        let mode = DriveMode::from_index(store.get_int(PARAM_MODE, d.mode.index()))
            .unwrap_or(DriveMode::Arcade);

        Self {
            options: DriveOptions {
                mode,
                square_inputs: store.get_bool(PARAM_SQUARE, d.square_inputs),
                quick_turn: store.get_bool(PARAM_QUICK_TURN, d.quick_turn),
                fixed_left: power(store.get_float(PARAM_FIXED_LEFT, d.fixed_left), d.fixed_left),
                fixed_right: power(
                    store.get_float(PARAM_FIXED_RIGHT, d.fixed_right),
                    d.fixed_right,
                ),
                rotation_gain: gain(
                    store.get_float(PARAM_ROT_GAIN, d.rotation_gain),
                    d.rotation_gain,
                ),
                slow_gain: gain(store.get_float(PARAM_SLOW_GAIN, d.slow_gain), d.slow_gain),
                min_deflect: gain(
                    store.get_float(PARAM_MIN_DEFLECT, d.min_deflect),
                    d.min_deflect,
                ),
                deadband: clamp_or(
                    store.get_float(PARAM_DEADBAND, DEFAULT_DEADBAND),
                    0.0,
                    MAX_DEADBAND,
                    DEFAULT_DEADBAND,
                ),
            },
        }
    }

    /// Validate drive parameters
    pub fn is_valid(&self) -> bool {
        let o = &self.options;
        let unit = |v: f32| (-1.0..=1.0).contains(&v);
        let positive_unit = |v: f32| (0.0..=1.0).contains(&v);
        unit(o.fixed_left)
            && unit(o.fixed_right)
            && positive_unit(o.rotation_gain)
            && positive_unit(o.slow_gain)
            && positive_unit(o.min_deflect)
            && (0.0..=MAX_DEADBAND).contains(&o.deadband)
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn power(value: f32, fallback: f32) -> f32 {
    clamp_or(value, -1.0, 1.0, fallback)
}

fn gain(value: f32, fallback: f32) -> f32 {
    clamp_or(value, 0.0, 1.0, fallback)
}
