//! Differential drive
//!
//! - [`power`]: left/right power command type
//! - [`mixing`]: arcade, tank and curvature mixers with deadband handling
//! - [`selector`]: maps a drive mode and joystick axes to a power pair
//! - [`config`]: persistent drivetrain options toggled by the operator

pub mod config;
pub mod mixing;
pub mod power;
pub mod selector;

pub use config::DrivetrainConfig;
pub use mixing::{apply_deadband, square_preserving_sign, DifferentialMixer, DEFAULT_DEADBAND};
pub use power::{clamp_unit, PowerPair};
pub use selector::{DriveInputs, DriveMode, DriveModeSelector, DriveOptions};
