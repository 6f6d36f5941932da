//! Command state machine interface
//!
//! Platform-agnostic lifecycle for anything that produces one output per tick
//! and must leave its actuators in a safe state when it stops.
//!
//! # Lifecycle
//!
//! 1. [`Session::start`] resets the machine
//! 2. [`Session::tick`] steps the machine once and forwards the output
//! 3. Dropping the session applies [`StateMachine::on_exit`] exactly once
//!
//! The exit output is applied on every path out of a session: normal
//! completion, early return, cancellation by dropping, and panic unwinding.

/// Tick-driven state machine with a mandatory exit action
pub trait StateMachine {
    /// Value produced each tick (e.g. a power pair)
    type Output;

    /// Return to the initial state using the current configuration
    fn reset(&mut self);

    /// Advance one tick and return the output for that tick
    fn step(&mut self) -> Self::Output;

    /// True once the machine will produce no further useful output
    fn is_terminal(&self) -> bool;

    /// Output that must be applied when the machine stops for any reason
    ///
    /// Implementations may also force the machine into its terminal state.
    fn on_exit(&mut self) -> Self::Output;

    /// Machine name for logging
    fn name(&self) -> &'static str;
}

/// Receiver of state machine outputs (motor actuation, recorders, ...)
pub trait OutputSink<T> {
    /// Apply one output
    fn apply(&mut self, output: T);
}

impl<T, F: FnMut(T)> OutputSink<T> for F {
    fn apply(&mut self, output: T) {
        self(output)
    }
}

/// Scoped run of a state machine
///
/// Owns mutable borrows of the machine and its sink for the duration of the
/// run. A terminal machine is never stepped.
pub struct Session<'a, M, S>
where
    M: StateMachine,
    S: OutputSink<M::Output>,
{
    machine: &'a mut M,
    sink: &'a mut S,
    ticks: u32,
}

impl<'a, M, S> Session<'a, M, S>
where
    M: StateMachine,
    S: OutputSink<M::Output>,
{
    /// Reset the machine and begin a session
    pub fn start(machine: &'a mut M, sink: &'a mut S) -> Self {
        machine.reset();
        Self {
            machine,
            sink,
            ticks: 0,
        }
    }

    /// Step once and forward the output to the sink
    ///
    /// Returns `true` while the machine is still running after this tick.
    /// Once the machine is terminal this does nothing and returns `false`.
    pub fn tick(&mut self) -> bool {
        if self.machine.is_terminal() {
            return false;
        }
        let output = self.machine.step();
        self.sink.apply(output);
        self.ticks = self.ticks.saturating_add(1);
        !self.machine.is_terminal()
    }

    /// Tick until the machine is terminal or `max_ticks` ticks have run
    ///
    /// Returns the number of ticks executed by this call.
    pub fn run(&mut self, max_ticks: u32) -> u32 {
        let mut executed = 0;
        while executed < max_ticks && !self.machine.is_terminal() {
            self.tick();
            executed += 1;
        }
        executed
    }

    /// True when the machine has reached its terminal state
    pub fn is_finished(&self) -> bool {
        self.machine.is_terminal()
    }

    /// Ticks executed since the session started
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Read access to the running machine
    pub fn machine(&self) -> &M {
        self.machine
    }

    /// End the session now (the exit output is applied on drop)
    pub fn finish(self) {}
}

impl<M, S> Drop for Session<'_, M, S>
where
    M: StateMachine,
    S: OutputSink<M::Output>,
{
    fn drop(&mut self) {
        let output = self.machine.on_exit();
        self.sink.apply(output);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::vec::Vec;

    /// Counts up to a limit, exit output is 0
    struct Counter {
        value: i32,
        limit: i32,
        resets: u32,
    }

    impl Counter {
        fn new(limit: i32) -> Self {
            Self {
                value: 0,
                limit,
                resets: 0,
            }
        }
    }

    impl StateMachine for Counter {
        type Output = i32;

        fn reset(&mut self) {
            self.value = 0;
            self.resets += 1;
        }

        fn step(&mut self) -> i32 {
            self.value += 1;
            self.value
        }

        fn is_terminal(&self) -> bool {
            self.value >= self.limit
        }

        fn on_exit(&mut self) -> i32 {
            self.value = self.limit;
            0
        }

        fn name(&self) -> &'static str {
            "Counter"
        }
    }

    #[test]
    fn test_session_runs_to_completion_then_exits_once() {
        let mut machine = Counter::new(3);
        let mut outputs: Vec<i32> = Vec::new();
        {
            let mut sink = |v: i32| outputs.push(v);
            let mut session = Session::start(&mut machine, &mut sink);
            assert!(session.tick());
            assert!(session.tick());
            assert!(!session.tick());
            // Terminal machines are not stepped again
            assert!(!session.tick());
            assert!(session.is_finished());
            assert_eq!(session.ticks(), 3);
        }
        assert_eq!(outputs, [1, 2, 3, 0]);
        assert_eq!(machine.resets, 1);
    }

    #[test]
    fn test_drop_applies_exit_when_cancelled() {
        let mut machine = Counter::new(100);
        let mut outputs: Vec<i32> = Vec::new();
        {
            let mut sink = |v: i32| outputs.push(v);
            let mut session = Session::start(&mut machine, &mut sink);
            session.tick();
            session.finish();
        }
        assert_eq!(outputs, [1, 0]);
        assert!(machine.is_terminal());
    }

    #[test]
    fn test_early_return_applies_exit() {
        fn run_two(machine: &mut Counter, outputs: &mut Vec<i32>) -> Option<()> {
            let mut sink = |v: i32| outputs.push(v);
            let mut session = Session::start(machine, &mut sink);
            session.tick();
            session.tick();
            let abort: Option<()> = None;
            abort?;
            session.tick();
            Some(())
        }

        let mut machine = Counter::new(10);
        let mut outputs = Vec::new();
        assert!(run_two(&mut machine, &mut outputs).is_none());
        assert_eq!(outputs, [1, 2, 0]);
    }

    #[test]
    fn test_run_stops_at_limit() {
        let mut machine = Counter::new(10);
        let mut count = 0;
        {
            let mut sink = |_v: i32| count += 1;
            let mut session = Session::start(&mut machine, &mut sink);
            assert_eq!(session.run(4), 4);
            assert_eq!(session.machine().value, 4);
            assert_eq!(session.run(100), 6);
        }
        // 10 steps plus one exit output
        assert_eq!(count, 11);
    }

    #[test]
    fn test_start_resets_machine() {
        let mut machine = Counter::new(2);
        machine.value = 2;
        let mut sink = |_v: i32| {};
        let session = Session::start(&mut machine, &mut sink);
        assert!(!session.is_finished());
    }
}
