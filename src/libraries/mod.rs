//! Common libraries
//!
//! - `oi`: Operator interface (gamepad axes, button edges, dashboard tunables)

pub mod oi;

pub use oi::OperatorInterface;
