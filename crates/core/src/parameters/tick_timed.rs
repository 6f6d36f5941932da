//! Tick-timed drive parameters
//!
//! - `TT_RAMP_TICKS` - Ticks to ramp power up and down
//! - `TT_CRUISE_TICKS` - Ticks to hold cruise power
//!
//! Cruise power comes from `DRV_FIXED_LEFT` / `DRV_FIXED_RIGHT`, shared with
//! fixed drive mode.

use super::drive::{DEFAULT_FIXED_POWER, PARAM_FIXED_LEFT, PARAM_FIXED_RIGHT};
use super::error::ParameterError;
use super::storage::{ParamFlags, ParamValue, ParameterStore};
use crate::sequencer::{DEFAULT_CRUISE_TICKS, DEFAULT_RAMP_TICKS};

pub const PARAM_RAMP_TICKS: &str = "TT_RAMP_TICKS";
pub const PARAM_CRUISE_TICKS: &str = "TT_CRUISE_TICKS";

/// Tick-timed drive parameters loaded from the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickTimedParams {
    /// Ramp duration in ticks
    pub ramp_ticks: u32,
    /// Cruise duration in ticks
    pub cruise_ticks: u32,
    /// Left cruise power before gain
    pub left_power: f32,
    /// Right cruise power before gain
    pub right_power: f32,
}

impl Default for TickTimedParams {
    fn default() -> Self {
        Self {
            ramp_ticks: DEFAULT_RAMP_TICKS,
            cruise_ticks: DEFAULT_CRUISE_TICKS,
            left_power: DEFAULT_FIXED_POWER,
            right_power: DEFAULT_FIXED_POWER,
        }
    }
}

impl TickTimedParams {
    /// Register tick-timed parameters with default values
    ///
    /// Also registers the shared fixed power values if absent.
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register(
            PARAM_RAMP_TICKS,
            ParamValue::Int(DEFAULT_RAMP_TICKS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_CRUISE_TICKS,
            ParamValue::Int(DEFAULT_CRUISE_TICKS as i32),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_FIXED_LEFT,
            ParamValue::Float(DEFAULT_FIXED_POWER),
            ParamFlags::empty(),
        )?;
        store.register(
            PARAM_FIXED_RIGHT,
            ParamValue::Float(DEFAULT_FIXED_POWER),
            ParamFlags::empty(),
        )?;
        Ok(())
    }

    /// Load tick-timed parameters
    ///
    /// Negative tick counts become 0 and powers are clamped to [-1.0, +1.0].
    pub fn from_store(store: &ParameterStore) -> Self {
        let ticks = |name: &str, default: u32| {
            store.get_int(name, default as i32).max(0) as u32
        };
        let power = |name: &str| {
            let v = store.get_float(name, DEFAULT_FIXED_POWER);
            if v.is_nan() {
                DEFAULT_FIXED_POWER
            } else {
                v.clamp(-1.0, 1.0)
            }
        };

        Self {
            ramp_ticks: ticks(PARAM_RAMP_TICKS, DEFAULT_RAMP_TICKS),
            cruise_ticks: ticks(PARAM_CRUISE_TICKS, DEFAULT_CRUISE_TICKS),
            left_power: power(PARAM_FIXED_LEFT),
            right_power: power(PARAM_FIXED_RIGHT),
        }
    }
}
