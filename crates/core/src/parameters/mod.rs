//! Dashboard parameters
//!
//! The dashboard is the operator's tuning surface: tunables are registered with
//! defaults, edited by the operator, and read back by commands when they start.
//! Diagnostics are published to the same store as read-only values.
//!
//! Typed groups wrap related names:
//!
//! - [`DriveParams`]: human drive mode options (`DRV_*`)
//! - [`TickTimedParams`]: tick-timed ramp configuration (`TT_*`)

pub mod drive;
pub mod error;
pub mod storage;
pub mod tick_timed;

pub use drive::DriveParams;
pub use error::ParameterError;
pub use storage::{ParamFlags, ParamMetadata, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};
pub use tick_timed::TickTimedParams;
