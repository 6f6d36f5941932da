//! Platform service traits
//!
//! Robot logic takes its platform services through these traits so it runs
//! unchanged on hardware, in the simulator and in host tests.

pub mod time;

pub use time::{MockTime, TimeSource};
