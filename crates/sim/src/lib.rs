//! drivebase_sim - Host simulator for the drivebase robot
//!
//! Runs the unmodified robot loop against a differential drive physics model
//! in lock-step simulated time. Used for tuning the tick-timed ramp and for
//! integration tests of the game-mode cycle.

pub mod driver_station;
pub mod error;
pub mod hardware;
pub mod physics;
pub mod robot;
pub mod time;

pub use driver_station::DriverStationSim;
pub use error::SimError;
pub use hardware::{SharedModel, SimJoystick};
pub use physics::{DrivetrainModel, ModelConfig, Side};
pub use robot::{PhaseReport, RampReport, SimRobot};
pub use time::SimTimeSource;
