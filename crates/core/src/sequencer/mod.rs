//! Tick-timed power ramp
//!
//! Drives both sides through three phases counted in control-loop ticks:
//!
//! ```text
//! power
//!   ^        ______________
//!   |       /              \
//!   |      /                \
//!   |_____/                  \______
//!        RampUp   Cruise   RampDown  Done
//! ```
//!
//! Used to check how consistently a drive base travels when driven purely by
//! time. Each phase resets the tick counter, so a 20/40 configuration reaches
//! cruise on tick 20, starts ramping down on tick 60 and is done on tick 80.

use crate::command::StateMachine;
use crate::drive::power::{clamp_unit, PowerPair};

/// Default ramp duration in ticks
pub const DEFAULT_RAMP_TICKS: u32 = 20;

/// Default cruise duration in ticks
pub const DEFAULT_CRUISE_TICKS: u32 = 40;

/// Sequencer phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RampPhase {
    /// Power rising linearly toward the target
    RampUp,
    /// Full target power
    Cruise,
    /// Power falling linearly toward zero
    RampDown,
    /// Finished, output is zero
    Done,
}

impl RampPhase {
    /// Phase name for logging and telemetry
    pub fn name(&self) -> &'static str {
        match self {
            RampPhase::RampUp => "RampUp",
            RampPhase::Cruise => "Cruise",
            RampPhase::RampDown => "RampDown",
            RampPhase::Done => "Done",
        }
    }
}

/// Three-phase tick-timed power ramp
#[derive(Debug, Clone)]
pub struct RampSequencer {
    phase: RampPhase,
    tick_count: u32,
    ramp_ticks: u32,
    cruise_ticks: u32,
    target: PowerPair,
}

impl Default for RampSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP_TICKS, DEFAULT_CRUISE_TICKS, 0.0, 0.0)
    }
}

impl RampSequencer {
    /// Create a sequencer ready to start ramping up
    pub fn new(ramp_ticks: u32, cruise_ticks: u32, left_target: f32, right_target: f32) -> Self {
        let mut sequencer = Self {
            phase: RampPhase::Done,
            tick_count: 0,
            ramp_ticks: 0,
            cruise_ticks: 0,
            target: PowerPair::STOP,
        };
        sequencer.initialize(ramp_ticks, cruise_ticks, left_target, right_target);
        sequencer
    }

    /// Configure and restart the sequence
    ///
    /// Targets are clamped to [-1.0, +1.0].
    pub fn initialize(
        &mut self,
        ramp_ticks: u32,
        cruise_ticks: u32,
        left_target: f32,
        right_target: f32,
    ) {
        self.ramp_ticks = ramp_ticks;
        self.cruise_ticks = cruise_ticks;
        self.target = PowerPair::new(left_target, right_target);
        self.restart();
    }

    /// Restart with the current configuration
    pub fn restart(&mut self) {
        self.phase = RampPhase::RampUp;
        self.tick_count = 0;
    }

    /// Advance one tick and return the power for this tick
    pub fn advance(&mut self) -> PowerPair {
        match self.phase {
            RampPhase::RampUp => {
                self.tick_count += 1;
                let power = self.target_scaled(self.ramp_fraction(self.tick_count));
                self.change_phase_at(RampPhase::Cruise, self.ramp_ticks);
                power
            }
            RampPhase::Cruise => {
                self.tick_count += 1;
                let power = self.target;
                self.change_phase_at(RampPhase::RampDown, self.cruise_ticks);
                power
            }
            RampPhase::RampDown => {
                self.tick_count += 1;
                let remaining = self.ramp_ticks.saturating_sub(self.tick_count);
                let power = self.target_scaled(self.ramp_fraction(remaining));
                self.change_phase_at(RampPhase::Done, self.ramp_ticks);
                power
            }
            RampPhase::Done => PowerPair::STOP,
        }
    }

    /// Stop immediately
    ///
    /// Forces the terminal phase and returns the stop output.
    pub fn interrupt(&mut self) -> PowerPair {
        self.phase = RampPhase::Done;
        self.tick_count = 0;
        PowerPair::STOP
    }

    /// True once the sequence is done
    pub fn is_finished(&self) -> bool {
        self.phase == RampPhase::Done
    }

    /// Current phase
    pub fn phase(&self) -> RampPhase {
        self.phase
    }

    /// Ticks spent in the current phase
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Configured ramp duration
    pub fn ramp_ticks(&self) -> u32 {
        self.ramp_ticks
    }

    /// Configured cruise duration
    pub fn cruise_ticks(&self) -> u32 {
        self.cruise_ticks
    }

    /// Cruise power
    pub fn target(&self) -> PowerPair {
        self.target
    }

    /// Ticks from a fresh start until the sequence is done
    ///
    /// Each phase runs for at least one tick.
    pub fn total_ticks(&self) -> u32 {
        let ramp = self.ramp_ticks.max(1);
        let cruise = self.cruise_ticks.max(1);
        ramp.saturating_mul(2).saturating_add(cruise)
    }

    fn ramp_fraction(&self, ticks: u32) -> f32 {
        if self.ramp_ticks == 0 {
            1.0
        } else {
            ticks as f32 / self.ramp_ticks as f32
        }
    }

    fn target_scaled(&self, fraction: f32) -> PowerPair {
        let fraction = clamp_unit(fraction);
        PowerPair::new(self.target.left * fraction, self.target.right * fraction)
    }

    fn change_phase_at(&mut self, next: RampPhase, at_ticks: u32) {
        if self.tick_count >= at_ticks {
            self.phase = next;
            self.tick_count = 0;
        }
    }
}

impl StateMachine for RampSequencer {
    type Output = PowerPair;

    fn reset(&mut self) {
        self.restart();
    }

    fn step(&mut self) -> PowerPair {
        self.advance()
    }

    fn is_terminal(&self) -> bool {
        self.is_finished()
    }

    fn on_exit(&mut self) -> PowerPair {
        self.interrupt()
    }

    fn name(&self) -> &'static str {
        "RampSequencer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Session;

    extern crate std;
    use std::vec::Vec;

    const EPS: f32 = 1e-5;

    fn run_all(sequencer: &mut RampSequencer) -> Vec<(RampPhase, PowerPair)> {
        let mut out = Vec::new();
        while !sequencer.is_finished() {
            let power = sequencer.advance();
            out.push((sequencer.phase(), power));
        }
        out
    }

    #[test]
    fn test_twenty_forty_scenario() {
        let mut seq = RampSequencer::new(20, 40, 1.0, 1.0);
        let trace = run_all(&mut seq);

        assert_eq!(trace.len(), 80);
        assert_eq!(seq.total_ticks(), 80);

        // Tick 20: last ramp-up tick at full target, now cruising
        let (phase, power) = trace[19];
        assert_eq!(phase, RampPhase::Cruise);
        assert!((power.left - 1.0).abs() < EPS && (power.right - 1.0).abs() < EPS);

        // Tick 60: last cruise tick, now ramping down
        let (phase, power) = trace[59];
        assert_eq!(phase, RampPhase::RampDown);
        assert!((power.left - 1.0).abs() < EPS);

        // Tick 80: done with zero output
        let (phase, power) = trace[79];
        assert_eq!(phase, RampPhase::Done);
        assert!(power.is_stopped());
        assert!(seq.is_finished());
    }

    #[test]
    fn test_first_tick_power() {
        let mut seq = RampSequencer::new(20, 40, 0.4, -0.4);
        let power = seq.advance();
        assert!((power.left - 0.02).abs() < EPS);
        assert!((power.right + 0.02).abs() < EPS);
        assert_eq!(seq.tick_count(), 1);
        assert_eq!(seq.phase(), RampPhase::RampUp);
    }

    #[test]
    fn test_ramp_monotonic() {
        let mut seq = RampSequencer::new(10, 5, 0.8, -0.6);
        let mut last_up = 0.0f32;
        let mut last_down = f32::MAX;

        while !seq.is_finished() {
            let phase_before = seq.phase();
            let magnitude = seq.advance().max_magnitude();
            match phase_before {
                RampPhase::RampUp => {
                    assert!(magnitude >= last_up);
                    last_up = magnitude;
                }
                RampPhase::Cruise => {
                    assert!((magnitude - 0.8).abs() < EPS);
                }
                RampPhase::RampDown => {
                    assert!(magnitude <= last_down);
                    last_down = magnitude;
                }
                RampPhase::Done => unreachable!(),
            }
        }
        assert!((last_up - 0.8).abs() < EPS);
        assert!(last_down.abs() < EPS);
    }

    #[test]
    fn test_phases_never_regress() {
        let mut seq = RampSequencer::new(3, 2, 1.0, 1.0);
        let mut last = seq.phase();
        for _ in 0..20 {
            seq.advance();
            assert!(seq.phase() >= last);
            last = seq.phase();
        }
        assert_eq!(last, RampPhase::Done);
    }

    #[test]
    fn test_done_outputs_zero() {
        let mut seq = RampSequencer::new(1, 1, 1.0, 1.0);
        run_all(&mut seq);
        for _ in 0..5 {
            assert!(seq.advance().is_stopped());
            assert_eq!(seq.phase(), RampPhase::Done);
        }
    }

    #[test]
    fn test_zero_ramp_ticks_uses_full_target() {
        let mut seq = RampSequencer::new(0, 2, 0.5, 0.5);
        let trace = run_all(&mut seq);
        assert_eq!(trace.len() as u32, seq.total_ticks());
        for (_, power) in &trace {
            assert!(power.left.is_finite());
            assert!((power.left - 0.5).abs() < EPS);
        }
    }

    #[test]
    fn test_zero_cruise_ticks() {
        let mut seq = RampSequencer::new(2, 0, 1.0, 1.0);
        let trace = run_all(&mut seq);
        assert_eq!(trace.len(), 5);
        assert_eq!(seq.total_ticks(), 5);
    }

    #[test]
    fn test_targets_clamped() {
        let seq = RampSequencer::new(20, 40, 2.0, -3.0);
        assert_eq!(seq.target(), PowerPair::new(1.0, -1.0));
    }

    #[test]
    fn test_interrupt() {
        let mut seq = RampSequencer::new(20, 40, 1.0, 1.0);
        for _ in 0..30 {
            seq.advance();
        }
        assert_eq!(seq.phase(), RampPhase::Cruise);
        assert!(seq.interrupt().is_stopped());
        assert!(seq.is_finished());
        assert!(seq.advance().is_stopped());
    }

    #[test]
    fn test_initialize_restarts() {
        let mut seq = RampSequencer::new(2, 2, 1.0, 1.0);
        run_all(&mut seq);
        seq.initialize(4, 8, 0.3, 0.3);
        assert_eq!(seq.phase(), RampPhase::RampUp);
        assert_eq!(seq.tick_count(), 0);
        assert_eq!(seq.ramp_ticks(), 4);
        assert_eq!(seq.cruise_ticks(), 8);
    }

    #[test]
    fn test_session_exit_after_done_is_single_stop() {
        let mut seq = RampSequencer::new(20, 40, 1.0, 1.0);
        let mut outputs: Vec<PowerPair> = Vec::new();
        {
            let mut sink = |p: PowerPair| outputs.push(p);
            let mut session = Session::start(&mut seq, &mut sink);
            let ticks = session.run(1000);
            assert_eq!(ticks, 80);
        }
        assert_eq!(outputs.len(), 81);
        let exit = outputs[80];
        assert!(exit.is_stopped());
    }

    #[test]
    fn test_session_exit_after_interrupt_is_single_stop() {
        let mut seq = RampSequencer::new(20, 40, 1.0, 1.0);
        let mut outputs: Vec<PowerPair> = Vec::new();
        {
            let mut sink = |p: PowerPair| outputs.push(p);
            let mut session = Session::start(&mut seq, &mut sink);
            session.run(25);
        }
        assert_eq!(outputs.len(), 26);
        assert!(outputs[25].is_stopped());
        assert!(!outputs[24].is_stopped());
        assert!(seq.is_finished());
    }
}
