//! Robot subsystems
//!
//! A subsystem owns a group of hardware and is required by at most one
//! command at a time (see [`crate::core::scheduler`]).

pub mod drive;

pub use drive::{DriveHardware, DriveSubsystem, Tread, DEFAULT_VOLTAGE_COMPENSATION};
