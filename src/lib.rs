#![cfg_attr(not(test), no_std)]

//! drivebase - Drive base test robot
//!
//! Robot layer on top of `drivebase_core`: hardware abstraction, the drive
//! subsystem, operator interface, robot commands and the robot loop.
//!
//! The host scheduler (hardware runtime or the simulator) calls
//! [`robot::Robot::loop_func`] once per 20 ms tick.

extern crate alloc;

// Platform abstraction (motors, encoders, gyro, accelerometer, joystick)
pub mod platform;

// Logging macros and the command scheduler
pub mod core;

// Operator interface
pub mod libraries;

// Drive base subsystem
pub mod subsystems;

// Robot commands and game-mode state machine
pub mod robot;
