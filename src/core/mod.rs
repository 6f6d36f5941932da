//! Core robot infrastructure
//!
//! Logging macros, dashboard publishing and the command scheduler that runs
//! robot commands each tick.

pub mod dashboard;
pub mod logging;
pub mod scheduler;
