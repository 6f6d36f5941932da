//! drivebase_core - Pure no_std drive logic for the drivebase robot
//!
//! This crate contains platform-agnostic algorithms and types
//! that can be tested on host without any feature flags or hardware dependencies.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Platform services injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic trait abstractions (TimeSource)
//! - [`command`]: Command state machine interface with guaranteed exit action
//! - [`sequencer`]: Tick-timed three-phase power ramp
//! - [`drive`]: Differential drive mixing and drive mode selection
//! - [`stats`]: Running statistics and loop rate measurement
//! - [`parameters`]: Dashboard parameter store and typed parameter groups
//! - [`measure`]: Encoder scaling and drive measurement deltas
//! - [`loadtest`]: CPU load test workload and loop-count search

#![no_std]

pub mod command;
pub mod drive;
pub mod loadtest;
pub mod measure;
pub mod parameters;
pub mod sequencer;
pub mod stats;
pub mod traits;
